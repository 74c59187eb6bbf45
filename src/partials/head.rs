use maud::{Markup, html};

pub(crate) fn head(title: &str) -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            link rel="stylesheet" type="text/css" href="/app.css";
            link rel="stylesheet"
                href="https://cdn.jsdelivr.net/npm/katex@0.15.2/dist/katex.min.css"
                integrity="sha384-MlJdn/WNKDGXveldHDdyRP1R4CTHr3FeuDNfhsLPYrq2t0UBkUdK2jyTnXPEK1NQ"
                crossorigin="anonymous";
            title { (title) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_link_metadata() {
        let html = head("Test").into_string();
        assert!(html.contains("katex@0.15.2/dist/katex.min.css"));
        assert!(html.contains("integrity=\"sha384-MlJdn/WNKDGXveldHDdyRP1R4CTHr3FeuDNfhsLPYrq2t0UBkUdK2jyTnXPEK1NQ\""));
        assert!(html.contains("crossorigin=\"anonymous\""));
    }
}
