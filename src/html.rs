use maud::{html, Markup, DOCTYPE};

use crate::category::CookieCategory;
use crate::config::ConsentConfig;
use crate::form;
use crate::locale::Locale;

/// The consent form: one checkbox per category and a save button.
///
/// Posts back to the page it is rendered on; the response layer captures
/// the submission wherever it lands.
pub fn consent_form(locale: Locale) -> Markup {
    let catalog = locale.catalog();
    html! {
        form.cookie-consent-form method="post" action="" {
            input type="hidden" name=(form::SUBMIT_FIELD) value="1";
            ul {
                @for category in CookieCategory::ALL {
                    li.cookie-consent-category {
                        label for={ "cookie-consent-" (category) } {
                            (catalog.category_label(category))
                        }
                        p.description { (catalog.category_description(category)) }
                        input
                            id={ "cookie-consent-" (category) }
                            name=(category)
                            value="true"
                            type="checkbox";
                    }
                }
            }
            button type="submit" { (catalog.save) }
        }
    }
}

/// The banner fragment injected into outgoing pages.
pub fn banner(config: &ConsentConfig, locale: Locale) -> Markup {
    let catalog = locale.catalog();
    html! {
        aside #cookie-consent class={ "cookie-consent cookie-consent-" (config.theme) } {
            h2 { (catalog.title) }
            p { (catalog.intro) }
            (consent_form(locale))
        }
    }
}

/// The standalone consent document, for iframe or AJAX embedding.
pub fn consent_document(config: &ConsentConfig, locale: Locale) -> Markup {
    let catalog = locale.catalog();
    html! {
        (DOCTYPE)
        html lang=(locale) {
            head {
                title { (catalog.title) }
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(href) = &config.stylesheet {
                    link type="text/css" rel="stylesheet" href=(href);
                }
            }
            body class={ "cookie-consent-" (config.theme) } {
                (banner(config, locale))
            }
        }
    }
}
