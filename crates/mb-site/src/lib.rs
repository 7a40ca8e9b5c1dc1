//! Server-rendered HTML pages for MediBusca.
//!
//! This crate turns resolved page intents and doctor query results into
//! complete HTML documents. Pages are built by hand with `std::fmt::Write`
//! string assembly; there is no client-side rendering, only a small script
//! feeding the search box datalist.
//!
//! The crate is pure presentation: no I/O, no knowledge of the HTTP layer.
//! Every internal link is generated through [`mb_directory::slugify`], which
//! is the same function the resolver matches incoming segments with.

mod content;
mod describe;
mod layout;
mod pages;
mod pagination;

pub use content::{ArticleSection, DiseaseArticle, articles, find_article};
pub use describe::specialty_description;
pub use layout::{PageShell, SiteContext, render_shell};
pub use pages::{
    CityPageData, DiseasePageData, ListingData, SearchPageData, SpecialtyPageData, StatePageData,
    render_city_page, render_disease_page, render_diseases_index, render_home, render_not_found,
    render_search_page, render_specialty_page, render_states_index, render_state_page,
};
pub use pagination::{PageItem, Pagination};
