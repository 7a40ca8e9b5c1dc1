//! HTML page shell.
//!
//! Every page shares the same chrome: head with title and meta description,
//! header with the site name and the search form, and a footer. Page bodies
//! are rendered separately and injected into the shell.

use std::fmt::Write;

/// Site-wide presentation context.
#[derive(Debug, Clone)]
pub struct SiteContext {
    /// Site name shown in titles and the header.
    pub site_name: String,
}

/// Per-page chrome data.
pub struct PageShell<'a> {
    /// Page title (site name is appended automatically).
    pub title: &'a str,
    /// Meta description, if the page has one.
    pub description: Option<&'a str>,
    /// Rendered body markup.
    pub content: &'a str,
}

/// Render a complete HTML document around a page body.
pub fn render_shell(site: &SiteContext, shell: &PageShell<'_>) -> String {
    let mut html = String::with_capacity(shell.content.len() + 2048);

    html.push_str("<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(
        html,
        "<title>{} | {}</title>",
        escape(shell.title),
        escape(&site.site_name)
    );
    if let Some(description) = shell.description {
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape(description)
        );
    }
    html.push_str("</head>\n<body>\n");

    render_header(&mut html, site);

    html.push_str("<main>\n");
    html.push_str(shell.content);
    html.push_str("</main>\n");

    render_footer(&mut html);

    html.push_str("</body>\n</html>");
    html
}

/// Render the header: site name plus the search form with autocomplete.
fn render_header(html: &mut String, site: &SiteContext) {
    html.push_str("<header>\n");
    let _ = writeln!(
        html,
        "<a href=\"/\" class=\"site-name\">{}</a>",
        escape(&site.site_name)
    );

    // The form works without scripting; the script only feeds the datalist.
    html.push_str("<form action=\"/buscar\" method=\"get\" role=\"search\">\n");
    html.push_str(
        "<input type=\"search\" name=\"q\" list=\"mb-sugerencias\" \
         placeholder=\"Busca doctores o especialidades\" autocomplete=\"off\">\n",
    );
    html.push_str("<datalist id=\"mb-sugerencias\"></datalist>\n");
    html.push_str("<button type=\"submit\">Buscar</button>\n");
    html.push_str("</form>\n");
    html.push_str(concat!(
        "<script>\n",
        "const input = document.querySelector('input[name=q]');\n",
        "const list = document.getElementById('mb-sugerencias');\n",
        "input.addEventListener('input', async () => {\n",
        "  if (input.value.length < 2) return;\n",
        "  const res = await fetch('/api/search?q=' + encodeURIComponent(input.value));\n",
        "  if (!res.ok) return;\n",
        "  const data = await res.json();\n",
        "  list.innerHTML = '';\n",
        "  for (const s of data.suggestions) {\n",
        "    const opt = document.createElement('option');\n",
        "    opt.value = s.label;\n",
        "    list.appendChild(opt);\n",
        "  }\n",
        "});\n",
        "</script>\n",
    ));
    html.push_str("</header>\n");
}

fn render_footer(html: &mut String) {
    html.push_str("<footer>\n<nav>\n");
    html.push_str("<a href=\"/doctores\">Doctores por estado</a>\n");
    html.push_str("<a href=\"/enfermedades\">Enfermedades</a>\n");
    html.push_str("</nav>\n</footer>\n");
}

/// Escape HTML special characters.
pub(crate) fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn site() -> SiteContext {
        SiteContext {
            site_name: "MediBusca".to_owned(),
        }
    }

    #[test]
    fn shell_contains_title_and_content() {
        let html = render_shell(
            &site(),
            &PageShell {
                title: "Doctores en Monterrey",
                description: None,
                content: "<p>listado</p>",
            },
        );

        assert!(html.contains("<title>Doctores en Monterrey | MediBusca</title>"));
        assert!(html.contains("<p>listado</p>"));
        assert!(html.contains("lang=\"es\""));
    }

    #[test]
    fn shell_includes_description_when_present() {
        let html = render_shell(
            &site(),
            &PageShell {
                title: "t",
                description: Some("Los mejores \"doctores\""),
                content: "",
            },
        );

        assert!(html.contains("content=\"Los mejores &quot;doctores&quot;\""));
    }

    #[test]
    fn shell_has_search_form_and_footer_nav() {
        let html = render_shell(
            &site(),
            &PageShell {
                title: "t",
                description: None,
                content: "",
            },
        );

        assert!(html.contains("action=\"/buscar\""));
        assert!(html.contains("/api/search?q="));
        assert!(html.contains("href=\"/enfermedades\""));
    }

    #[test]
    fn escape_special_characters() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("a&b"), "a&amp;b");
        assert_eq!(escape("\"hola\""), "&quot;hola&quot;");
    }
}
