pub(crate) mod article;
pub(crate) mod boundary;
pub(crate) mod footer;
pub(crate) mod head;
