use std::fmt::Display;

use crate::category::CookieCategory;

/// Languages the consent form ships labels for.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Locale {
    #[default]
    En,
    De,
    Fr,
    Nl,
}

impl Locale {
    /// Resolve a language tag such as `en` or `en-US`. Only the primary
    /// subtag is considered; unknown tags yield `None` so the caller can
    /// fall back to its configured default.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let primary = tag.split(['-', '_']).next().unwrap_or(tag);
        match primary.to_ascii_lowercase().as_str() {
            "en" => Some(Locale::En),
            "de" => Some(Locale::De),
            "fr" => Some(Locale::Fr),
            "nl" => Some(Locale::Nl),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
            Locale::Fr => "fr",
            Locale::Nl => "nl",
        }
    }

    /// The label catalog for this locale.
    pub fn catalog(self) -> &'static Catalog {
        match self {
            Locale::En => &EN,
            Locale::De => &DE,
            Locale::Fr => &FR,
            Locale::Nl => &NL,
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Every piece of user-facing text the consent views render.
pub struct Catalog {
    pub title: &'static str,
    pub intro: &'static str,
    pub save: &'static str,
    categories: [(&'static str, &'static str); 4],
}

impl Catalog {
    pub fn category_label(&self, category: CookieCategory) -> &'static str {
        self.categories[category_index(category)].0
    }

    pub fn category_description(&self, category: CookieCategory) -> &'static str {
        self.categories[category_index(category)].1
    }
}

fn category_index(category: CookieCategory) -> usize {
    CookieCategory::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or(0)
}

static EN: Catalog = Catalog {
    title: "Cookie settings",
    intro: "This website uses cookies to personalise content and to analyse \
            traffic. Choose below which cookie categories you allow.",
    save: "Save preferences",
    categories: [
        (
            "Analytics cookies",
            "Measure how the website is used so it can be improved.",
        ),
        (
            "Tracking cookies",
            "Follow your visit across the pages of this website.",
        ),
        (
            "Marketing cookies",
            "Show advertisements relevant to your interests.",
        ),
        (
            "Social media cookies",
            "Enable sharing content through social media platforms.",
        ),
    ],
};

static DE: Catalog = Catalog {
    title: "Cookie-Einstellungen",
    intro: "Diese Website verwendet Cookies, um Inhalte zu personalisieren \
            und den Verkehr zu analysieren. Wählen Sie unten aus, welche \
            Cookie-Kategorien Sie zulassen.",
    save: "Einstellungen speichern",
    categories: [
        (
            "Analyse-Cookies",
            "Messen, wie die Website genutzt wird, damit sie verbessert werden kann.",
        ),
        (
            "Tracking-Cookies",
            "Verfolgen Ihren Besuch über die Seiten dieser Website.",
        ),
        (
            "Marketing-Cookies",
            "Zeigen Werbung, die Ihren Interessen entspricht.",
        ),
        (
            "Social-Media-Cookies",
            "Ermöglichen das Teilen von Inhalten über soziale Medien.",
        ),
    ],
};

static FR: Catalog = Catalog {
    title: "Paramètres des cookies",
    intro: "Ce site utilise des cookies pour personnaliser le contenu et \
            analyser le trafic. Choisissez ci-dessous les catégories de \
            cookies que vous autorisez.",
    save: "Enregistrer les préférences",
    categories: [
        (
            "Cookies d'analyse",
            "Mesurent l'utilisation du site afin de l'améliorer.",
        ),
        (
            "Cookies de suivi",
            "Suivent votre visite à travers les pages de ce site.",
        ),
        (
            "Cookies marketing",
            "Affichent des publicités correspondant à vos intérêts.",
        ),
        (
            "Cookies de réseaux sociaux",
            "Permettent de partager du contenu via les réseaux sociaux.",
        ),
    ],
};

static NL: Catalog = Catalog {
    title: "Cookie-instellingen",
    intro: "Deze website gebruikt cookies om inhoud te personaliseren en \
            verkeer te analyseren. Kies hieronder welke cookiecategorieën \
            u toestaat.",
    save: "Voorkeuren opslaan",
    categories: [
        (
            "Analytische cookies",
            "Meten hoe de website wordt gebruikt zodat deze verbeterd kan worden.",
        ),
        (
            "Tracking cookies",
            "Volgen uw bezoek over de pagina's van deze website.",
        ),
        (
            "Marketing cookies",
            "Tonen advertenties die aansluiten bij uw interesses.",
        ),
        (
            "Social media cookies",
            "Maken het delen van inhoud via social media mogelijk.",
        ),
    ],
};
