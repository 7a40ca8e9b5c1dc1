//! Page templates.
//!
//! One render function per page intent, each returning a complete HTML
//! document. Every internal link is built through [`mb_directory::slugify`]
//! so generated URLs always resolve back to the entity they were generated
//! from.

use std::fmt::Write;

use mb_directory::{DOCTORS_PREFIX, ReferenceDataset, display_name_from_slug, slugify};
use mb_store::Doctor;

use crate::content::DiseaseArticle;
use crate::layout::{PageShell, SiteContext, escape, render_shell};
use crate::pagination::{PageItem, Pagination};

/// Doctor listing data shared by city, state, specialty and search pages.
#[derive(Debug)]
pub struct ListingData {
    /// Records for the current page.
    pub doctors: Vec<Doctor>,
    /// Pagination widget data.
    pub pagination: Pagination,
    /// Path the pagination links point at (no query string).
    pub base_path: String,
}

/// Data for the state landing page.
#[derive(Debug)]
pub struct StatePageData {
    /// State slug.
    pub state_slug: String,
    /// City (if any) whose slug equals the state slug.
    pub self_named_city: Option<String>,
    /// City display names in dataset order.
    pub cities: Vec<String>,
    /// Canonical specialties, linked only when the state has a self-named
    /// city (those URLs resolve nowhere otherwise).
    pub specialties: Vec<String>,
    /// Doctors in the state.
    pub listing: ListingData,
}

/// Data for a city listing page.
#[derive(Debug)]
pub struct CityPageData {
    /// Containing state slug.
    pub state_slug: String,
    /// City display name.
    pub city_name: String,
    /// Doctors in the city.
    pub listing: ListingData,
}

/// Data for a specialty-in-city listing page.
#[derive(Debug)]
pub struct SpecialtyPageData {
    /// Containing state slug.
    pub state_slug: String,
    /// The state's self-named city.
    pub city_name: String,
    /// Canonical specialty display name.
    pub specialty_name: String,
    /// Description paragraph (configured or generated).
    pub description: String,
    /// Doctors matching city and specialty.
    pub listing: ListingData,
}

/// Data for a disease page.
#[derive(Debug)]
pub struct DiseasePageData {
    /// Disease display name.
    pub disease_name: String,
    /// Editorial article, when one exists.
    pub article: Option<&'static DiseaseArticle>,
    /// Doctors treating the disease.
    pub listing: ListingData,
}

/// Data for the search results page.
#[derive(Debug)]
pub struct SearchPageData {
    /// Raw query text as typed.
    pub query: String,
    /// Doctors whose name matches the query prefix.
    pub listing: ListingData,
}

/// Render the home page: states directory, diseases and specialties.
pub fn render_home(site: &SiteContext, dataset: &ReferenceDataset) -> String {
    let mut content = String::with_capacity(4096);

    content.push_str("<h1>Encuentra doctores en México</h1>\n");
    content.push_str(
        "<p>Busca por nombre o navega por estado, ciudad y especialidad. \
         También publicamos guías sobre enfermedades frecuentes.</p>\n",
    );

    content.push_str("<section>\n<h2>Estados</h2>\n<ul class=\"states\">\n");
    render_state_links(&mut content, dataset);
    content.push_str("</ul>\n</section>\n");

    content.push_str("<section>\n<h2>Enfermedades</h2>\n<ul class=\"diseases\">\n");
    for disease in dataset.disease_names() {
        let _ = writeln!(
            content,
            "<li><a href=\"/enfermedades/{}\">{}</a></li>",
            slugify(disease),
            escape(disease)
        );
    }
    content.push_str("</ul>\n</section>\n");

    content.push_str("<section>\n<h2>Especialidades</h2>\n<ul class=\"specialties\">\n");
    for specialty in dataset.specialty_names() {
        let _ = writeln!(content, "<li>{}</li>", escape(specialty));
    }
    content.push_str("</ul>\n</section>\n");

    render_shell(
        site,
        &PageShell {
            title: "Encuentra doctores en México",
            description: Some(
                "Directorio de doctores por estado, ciudad y especialidad, \
                 con guías sobre enfermedades frecuentes.",
            ),
            content: &content,
        },
    )
}

/// Render the states directory (`/doctores`).
pub fn render_states_index(site: &SiteContext, dataset: &ReferenceDataset) -> String {
    let mut content = String::with_capacity(2048);

    content.push_str("<h1>Doctores por estado</h1>\n<ul class=\"states\">\n");
    render_state_links(&mut content, dataset);
    content.push_str("</ul>\n");

    render_shell(
        site,
        &PageShell {
            title: "Doctores por estado",
            description: Some("Elige un estado para ver sus ciudades y doctores."),
            content: &content,
        },
    )
}

/// Render a state landing page.
pub fn render_state_page(site: &SiteContext, data: &StatePageData) -> String {
    let state_name = display_name_from_slug(&data.state_slug);
    let title = format!("Doctores en {state_name}");
    let description = format!(
        "Directorio de doctores en {state_name}: elige una ciudad o una especialidad."
    );
    let mut content = String::with_capacity(4096);

    let _ = writeln!(content, "<h1>{}</h1>", escape(&title));

    content.push_str("<section>\n<h2>Ciudades</h2>\n<ul class=\"cities\">\n");
    for city in &data.cities {
        // The self-named city's canonical URL is the state URL itself.
        let href = if slugify(city) == data.state_slug {
            format!("{DOCTORS_PREFIX}/{}", data.state_slug)
        } else {
            format!("{DOCTORS_PREFIX}/{}/{}", data.state_slug, slugify(city))
        };
        let _ = writeln!(content, "<li><a href=\"{href}\">{}</a></li>", escape(city));
    }
    content.push_str("</ul>\n</section>\n");

    if data.self_named_city.is_some() && !data.specialties.is_empty() {
        content.push_str("<section>\n<h2>Especialidades</h2>\n<ul class=\"specialties\">\n");
        for specialty in &data.specialties {
            let _ = writeln!(
                content,
                "<li><a href=\"{DOCTORS_PREFIX}/{}/{}\">{}</a></li>",
                data.state_slug,
                slugify(specialty),
                escape(specialty)
            );
        }
        content.push_str("</ul>\n</section>\n");
    }

    render_listing(&mut content, &data.listing);

    render_shell(
        site,
        &PageShell {
            title: &title,
            description: Some(&description),
            content: &content,
        },
    )
}

/// Render a city listing page.
pub fn render_city_page(site: &SiteContext, data: &CityPageData) -> String {
    let state_name = display_name_from_slug(&data.state_slug);
    let title = format!("Doctores en {}", data.city_name);
    let description = format!(
        "Directorio de doctores en {}, {state_name}: perfiles, direcciones y teléfonos.",
        data.city_name
    );
    let mut content = String::with_capacity(4096);

    let _ = writeln!(content, "<h1>{}</h1>", escape(&title));
    let _ = writeln!(
        content,
        "<p class=\"crumb\"><a href=\"{DOCTORS_PREFIX}/{}\">{}</a> / {}</p>",
        data.state_slug,
        escape(&state_name),
        escape(&data.city_name)
    );

    render_listing(&mut content, &data.listing);

    render_shell(
        site,
        &PageShell {
            title: &title,
            description: Some(&description),
            content: &content,
        },
    )
}

/// Render a specialty-in-city listing page.
pub fn render_specialty_page(site: &SiteContext, data: &SpecialtyPageData) -> String {
    let title = format!("{} en {}", data.specialty_name, data.city_name);
    let mut content = String::with_capacity(4096);

    let _ = writeln!(content, "<h1>{}</h1>", escape(&title));
    let _ = writeln!(content, "<p>{}</p>", escape(&data.description));
    let _ = writeln!(
        content,
        "<p class=\"crumb\"><a href=\"{DOCTORS_PREFIX}/{}\">{}</a> / {}</p>",
        data.state_slug,
        escape(&display_name_from_slug(&data.state_slug)),
        escape(&data.specialty_name)
    );

    render_listing(&mut content, &data.listing);

    render_shell(
        site,
        &PageShell {
            title: &title,
            description: Some(&data.description),
            content: &content,
        },
    )
}

/// Render a disease page: article sections plus related doctors.
pub fn render_disease_page(site: &SiteContext, data: &DiseasePageData) -> String {
    let title = data.disease_name.clone();
    let mut content = String::with_capacity(4096);

    let _ = writeln!(content, "<h1>{}</h1>", escape(&title));

    let description = match data.article {
        Some(article) => {
            let _ = writeln!(content, "<p class=\"summary\">{}</p>", escape(article.summary));
            for section in article.sections {
                let _ = writeln!(content, "<h2>{}</h2>", escape(section.heading));
                let _ = writeln!(content, "<p>{}</p>", escape(section.body));
            }
            article.summary.to_owned()
        }
        None => format!(
            "Información sobre {} y doctores que la atienden.",
            data.disease_name
        ),
    };

    let _ = writeln!(
        content,
        "<h2>Doctores que atienden {}</h2>",
        escape(&data.disease_name)
    );
    render_listing(&mut content, &data.listing);

    render_shell(
        site,
        &PageShell {
            title: &title,
            description: Some(&description),
            content: &content,
        },
    )
}

/// Render the diseases index (`/enfermedades`).
///
/// Canonical diseases come first in dataset order; articles whose disease is
/// not canonical are appended so every published page is reachable.
pub fn render_diseases_index(
    site: &SiteContext,
    dataset: &ReferenceDataset,
    articles: &[DiseaseArticle],
) -> String {
    let mut content = String::with_capacity(2048);

    content.push_str("<h1>Enfermedades</h1>\n<ul class=\"diseases\">\n");
    let mut seen: Vec<String> = Vec::new();
    for disease in dataset.disease_names() {
        push_disease_link(&mut content, &mut seen, disease);
    }
    for article in articles {
        push_disease_link(&mut content, &mut seen, article.name);
    }
    content.push_str("</ul>\n");

    render_shell(
        site,
        &PageShell {
            title: "Enfermedades",
            description: Some("Guías informativas sobre enfermedades frecuentes."),
            content: &content,
        },
    )
}

/// Render the search results page.
pub fn render_search_page(site: &SiteContext, data: &SearchPageData) -> String {
    let title = format!("Resultados para \"{}\"", data.query);
    let mut content = String::with_capacity(2048);

    let _ = writeln!(content, "<h1>{}</h1>", escape(&title));
    render_listing(&mut content, &data.listing);

    render_shell(
        site,
        &PageShell {
            title: &title,
            description: None,
            content: &content,
        },
    )
}

/// Render the not-found page.
pub fn render_not_found(site: &SiteContext) -> String {
    let content = "<h1>Página no encontrada</h1>\n\
                   <p>La página que buscas no existe o cambió de dirección.</p>\n\
                   <p><a href=\"/\">Volver al inicio</a></p>\n";

    render_shell(
        site,
        &PageShell {
            title: "Página no encontrada",
            description: None,
            content,
        },
    )
}

fn render_state_links(html: &mut String, dataset: &ReferenceDataset) {
    for slug in dataset.state_slugs() {
        let _ = writeln!(
            html,
            "<li><a href=\"{DOCTORS_PREFIX}/{slug}\">{}</a></li>",
            escape(&display_name_from_slug(slug))
        );
    }
}

fn push_disease_link(html: &mut String, seen: &mut Vec<String>, name: &str) {
    let slug = slugify(name);
    if seen.contains(&slug) {
        return;
    }
    let _ = writeln!(
        html,
        "<li><a href=\"/enfermedades/{slug}\">{}</a></li>",
        escape(name)
    );
    seen.push(slug);
}

/// Render a doctor listing with its pagination widget.
fn render_listing(html: &mut String, listing: &ListingData) {
    if listing.doctors.is_empty() {
        html.push_str("<p class=\"empty\">No encontramos doctores para esta búsqueda.</p>\n");
        return;
    }

    html.push_str("<ul class=\"doctors\">\n");
    for doctor in &listing.doctors {
        render_doctor_card(html, doctor);
    }
    html.push_str("</ul>\n");

    render_pagination(html, &listing.base_path, &listing.pagination);
}

fn render_doctor_card(html: &mut String, doctor: &Doctor) {
    html.push_str("<li class=\"doctor\">\n");
    let _ = writeln!(html, "<h3>{}</h3>", escape(&doctor.name));
    if !doctor.specialties.is_empty() {
        let _ = writeln!(
            html,
            "<p class=\"specialties\">{}</p>",
            escape(&doctor.specialties.join(", "))
        );
    }
    if !doctor.cities.is_empty() {
        let _ = writeln!(
            html,
            "<p class=\"cities\">{}</p>",
            escape(&doctor.cities.join(", "))
        );
    }
    if let Some(address) = &doctor.address {
        let _ = writeln!(html, "<p class=\"address\">{}</p>", escape(address));
    }
    if let Some(phone) = &doctor.phone {
        let _ = writeln!(html, "<p class=\"phone\">{}</p>", escape(phone));
    }
    html.push_str("</li>\n");
}

/// Render the pagination widget.
fn render_pagination(html: &mut String, base_path: &str, pagination: &Pagination) {
    if pagination.is_trivial() {
        return;
    }

    html.push_str("<nav class=\"pagination\">\n<ul>\n");

    if let Some(prev) = pagination.prev {
        let _ = writeln!(
            html,
            "<li><a rel=\"prev\" href=\"{}\">Anterior</a></li>",
            page_href(base_path, prev)
        );
    }
    for item in &pagination.pages {
        match item {
            PageItem::Page(page) if *page == pagination.current => {
                let _ = writeln!(html, "<li class=\"current\">{page}</li>");
            }
            PageItem::Page(page) => {
                let _ = writeln!(
                    html,
                    "<li><a href=\"{}\">{page}</a></li>",
                    page_href(base_path, *page)
                );
            }
            PageItem::Gap => html.push_str("<li class=\"gap\">…</li>\n"),
        }
    }
    if let Some(next) = pagination.next {
        let _ = writeln!(
            html,
            "<li><a rel=\"next\" href=\"{}\">Siguiente</a></li>",
            page_href(base_path, next)
        );
    }

    html.push_str("</ul>\n</nav>\n");
}

/// First page links to the bare path so the canonical URL has no page
/// parameter. Paths that already carry a query (the search page) get `&`.
fn page_href(base_path: &str, page: u64) -> String {
    if page <= 1 {
        base_path.to_owned()
    } else if base_path.contains('?') {
        format!("{base_path}&pagina={page}")
    } else {
        format!("{base_path}?pagina={page}")
    }
}
