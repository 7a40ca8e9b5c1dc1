//! Informational disease articles.
//!
//! Built-in editorial content for disease pages. An article can exist for a
//! disease that is not in the canonical reference list; the resolver treats
//! that as sufficient to serve the page.

use mb_directory::slugify;

/// One section of a disease article.
#[derive(Debug)]
pub struct ArticleSection {
    /// Section heading.
    pub heading: &'static str,
    /// Body paragraph.
    pub body: &'static str,
}

/// Editorial article about a disease.
#[derive(Debug)]
pub struct DiseaseArticle {
    /// Disease display name.
    pub name: &'static str,
    /// One-paragraph summary shown under the title.
    pub summary: &'static str,
    /// Ordered article sections.
    pub sections: &'static [ArticleSection],
}

/// Look up an article whose name slugifies to the given slug.
#[must_use]
pub fn find_article(slug: &str) -> Option<&'static DiseaseArticle> {
    ARTICLES.iter().find(|article| slugify(article.name) == slug)
}

/// All built-in articles, in editorial order.
#[must_use]
pub fn articles() -> &'static [DiseaseArticle] {
    ARTICLES
}

static ARTICLES: &[DiseaseArticle] = &[
    DiseaseArticle {
        name: "Diabetes",
        summary: "La diabetes es una enfermedad crónica que aparece cuando el \
                  organismo no produce suficiente insulina o no la utiliza con \
                  eficacia, elevando la glucosa en sangre.",
        sections: &[
            ArticleSection {
                heading: "Síntomas frecuentes",
                body: "Sed excesiva, necesidad frecuente de orinar, fatiga, \
                       visión borrosa y pérdida de peso sin causa aparente. \
                       Muchas personas no presentan síntomas en etapas \
                       tempranas, por lo que los estudios periódicos son \
                       importantes.",
            },
            ArticleSection {
                heading: "Cuándo consultar",
                body: "Ante antecedentes familiares, sobrepeso o síntomas \
                       persistentes conviene acudir con un médico internista o \
                       endocrinólogo para una evaluación de glucosa en ayunas.",
            },
        ],
    },
    DiseaseArticle {
        name: "Hipertensión Arterial",
        summary: "La hipertensión arterial es la elevación sostenida de la \
                  presión de la sangre sobre las paredes de las arterias; no \
                  suele dar síntomas pero daña corazón, riñón y cerebro.",
        sections: &[
            ArticleSection {
                heading: "Factores de riesgo",
                body: "Edad, consumo elevado de sal, sedentarismo, tabaquismo y \
                       antecedentes familiares. El control periódico de la \
                       presión es la única forma confiable de detectarla.",
            },
            ArticleSection {
                heading: "Tratamiento",
                body: "Combina cambios de estilo de vida con medicamentos \
                       antihipertensivos indicados por un cardiólogo o médico \
                       general; el tratamiento es habitualmente de por vida.",
            },
        ],
    },
    DiseaseArticle {
        name: "Asma",
        summary: "El asma es una enfermedad inflamatoria crónica de las vías \
                  respiratorias que produce episodios de silbido, falta de \
                  aire y tos, frecuentemente de madrugada.",
        sections: &[ArticleSection {
            heading: "Control de la enfermedad",
            body: "El tratamiento con inhaladores controla la inflamación y \
                   previene crisis. Un neumólogo o alergólogo puede ajustar el \
                   esquema y detectar desencadenantes.",
        }],
    },
    DiseaseArticle {
        name: "Gastritis",
        summary: "La gastritis es la inflamación del revestimiento del \
                  estómago; puede ser aguda o crónica y se asocia con \
                  infección por Helicobacter pylori y uso de antiinflamatorios.",
        sections: &[ArticleSection {
            heading: "Síntomas frecuentes",
            body: "Ardor o dolor en la parte alta del abdomen, náusea y \
                   sensación de plenitud. Si hay vómito con sangre o heces \
                   negras se requiere atención inmediata.",
        }],
    },
    DiseaseArticle {
        name: "Migraña",
        summary: "La migraña es un dolor de cabeza recurrente, pulsátil y de \
                  intensidad moderada a grave, muchas veces acompañado de \
                  náusea y sensibilidad a la luz o al ruido.",
        sections: &[ArticleSection {
            heading: "Cuándo consultar",
            body: "Si los episodios interfieren con la vida diaria o aumentan \
                   de frecuencia, un neurólogo puede indicar tratamiento \
                   preventivo además del manejo de las crisis.",
        }],
    },
];
