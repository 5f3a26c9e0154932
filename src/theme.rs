//! Light and dark color themes for the paywall screen

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::{hex_to_rgb, Rgb};
use crate::{Error, Result};

/// Every semantic color role the screen paints with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorRole {
    Background,
    CardBackground,
    SelectedCardBackground,
    SelectedBorder,
    UnselectedBorder,
    Headline,
    Subtitle,
    BodyText,
    Checkmark,
    BadgeBackground,
    BadgeText,
    CtaBackground,
    CtaText,
    PriceBreakdown,
    FooterText,
    FooterSeparator,
    PriceLabel,
    PricePeriod,
    PriceName,
}

impl ColorRole {
    pub const ALL: [ColorRole; 19] = [
        ColorRole::Background,
        ColorRole::CardBackground,
        ColorRole::SelectedCardBackground,
        ColorRole::SelectedBorder,
        ColorRole::UnselectedBorder,
        ColorRole::Headline,
        ColorRole::Subtitle,
        ColorRole::BodyText,
        ColorRole::Checkmark,
        ColorRole::BadgeBackground,
        ColorRole::BadgeText,
        ColorRole::CtaBackground,
        ColorRole::CtaText,
        ColorRole::PriceBreakdown,
        ColorRole::FooterText,
        ColorRole::FooterSeparator,
        ColorRole::PriceLabel,
        ColorRole::PricePeriod,
        ColorRole::PriceName,
    ];

    /// Field name as it appears in theme JSON
    pub fn key(self) -> &'static str {
        match self {
            ColorRole::Background => "background",
            ColorRole::CardBackground => "cardBackground",
            ColorRole::SelectedCardBackground => "selectedCardBackground",
            ColorRole::SelectedBorder => "selectedBorder",
            ColorRole::UnselectedBorder => "unselectedBorder",
            ColorRole::Headline => "headline",
            ColorRole::Subtitle => "subtitle",
            ColorRole::BodyText => "bodyText",
            ColorRole::Checkmark => "checkmark",
            ColorRole::BadgeBackground => "badgeBackground",
            ColorRole::BadgeText => "badgeText",
            ColorRole::CtaBackground => "ctaBackground",
            ColorRole::CtaText => "ctaText",
            ColorRole::PriceBreakdown => "priceBreakdown",
            ColorRole::FooterText => "footerText",
            ColorRole::FooterSeparator => "footerSeparator",
            ColorRole::PriceLabel => "priceLabel",
            ColorRole::PricePeriod => "pricePeriod",
            ColorRole::PriceName => "priceName",
        }
    }
}

const LIGHT: [(ColorRole, &str); 19] = [
    (ColorRole::Background, "#FFF8F0"),
    (ColorRole::CardBackground, "#FFFDF7"),
    (ColorRole::SelectedCardBackground, "#F5FFF5"),
    (ColorRole::SelectedBorder, "#2D5A27"),
    (ColorRole::UnselectedBorder, "#E0D8CC"),
    (ColorRole::Headline, "#1A1C18"),
    (ColorRole::Subtitle, "#7A8B6F"),
    (ColorRole::BodyText, "#3D3D3D"),
    (ColorRole::Checkmark, "#66BB6A"),
    (ColorRole::BadgeBackground, "#D4A017"),
    (ColorRole::BadgeText, "#FFFDF7"),
    (ColorRole::CtaBackground, "#2D5A27"),
    (ColorRole::CtaText, "#FFFFFF"),
    (ColorRole::PriceBreakdown, "#8B6914"),
    (ColorRole::FooterText, "#7A8B6F"),
    (ColorRole::FooterSeparator, "#C0B8A8"),
    (ColorRole::PriceLabel, "#1A1C18"),
    (ColorRole::PricePeriod, "#7A8B6F"),
    (ColorRole::PriceName, "#7A8B6F"),
];

const DARK: [(ColorRole, &str); 19] = [
    (ColorRole::Background, "#1A1C18"),
    (ColorRole::CardBackground, "#121410"),
    (ColorRole::SelectedCardBackground, "#1E2A1A"),
    (ColorRole::SelectedBorder, "#66BB6A"),
    (ColorRole::UnselectedBorder, "#2A2C26"),
    (ColorRole::Headline, "#FFF8F0"),
    (ColorRole::Subtitle, "#A8B89A"),
    (ColorRole::BodyText, "#D4D0C8"),
    (ColorRole::Checkmark, "#66BB6A"),
    (ColorRole::BadgeBackground, "#D4A017"),
    (ColorRole::BadgeText, "#121410"),
    (ColorRole::CtaBackground, "#66BB6A"),
    (ColorRole::CtaText, "#121410"),
    (ColorRole::PriceBreakdown, "#CBB979"),
    (ColorRole::FooterText, "#A8B89A"),
    (ColorRole::FooterSeparator, "#3A3C36"),
    (ColorRole::PriceLabel, "#FFF8F0"),
    (ColorRole::PricePeriod, "#A8B89A"),
    (ColorRole::PriceName, "#A8B89A"),
];

/// A named mapping from color roles to `#RRGGBB` strings.
///
/// The built-in records are complete; themes loaded from JSON may not be,
/// which [`Palette::resolve`] reports instead of filling in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: BTreeMap<ColorRole, String>,
}

impl Theme {
    fn from_table(name: &str, table: &[(ColorRole, &str)]) -> Self {
        Self {
            name: name.to_string(),
            colors: table.iter().map(|(role, hex)| (*role, hex.to_string())).collect(),
        }
    }

    pub fn light() -> Self {
        Self::from_table("Furrow / Paywall / Light", &LIGHT)
    }

    pub fn dark() -> Self {
        Self::from_table("Furrow / Paywall / Dark", &DARK)
    }

    pub fn hex(&self, role: ColorRole) -> Result<&str> {
        self.colors
            .get(&role)
            .map(String::as_str)
            .ok_or_else(|| Error::MissingThemeField {
                theme: self.name.clone(),
                field: role.key().to_string(),
            })
    }

    pub fn rgb(&self, role: ColorRole) -> Result<Rgb> {
        hex_to_rgb(self.hex(role)?)
    }
}

/// A theme with every role present and parsed
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub name: String,
    pub background: Rgb,
    pub card_background: Rgb,
    pub selected_card_background: Rgb,
    pub selected_border: Rgb,
    pub unselected_border: Rgb,
    pub headline: Rgb,
    pub subtitle: Rgb,
    pub body_text: Rgb,
    pub checkmark: Rgb,
    pub badge_background: Rgb,
    pub badge_text: Rgb,
    pub cta_background: Rgb,
    pub cta_text: Rgb,
    pub price_breakdown: Rgb,
    pub footer_text: Rgb,
    pub footer_separator: Rgb,
    pub price_label: Rgb,
    pub price_period: Rgb,
    pub price_name: Rgb,
}

impl Palette {
    /// Check every role, in [`ColorRole::ALL`] order, and parse it.
    ///
    /// Missing roles are reported before malformed ones so the error names
    /// the first gap in the record.
    pub fn resolve(theme: &Theme) -> Result<Self> {
        for role in ColorRole::ALL {
            theme.hex(role)?;
        }
        Ok(Self {
            name: theme.name.clone(),
            background: theme.rgb(ColorRole::Background)?,
            card_background: theme.rgb(ColorRole::CardBackground)?,
            selected_card_background: theme.rgb(ColorRole::SelectedCardBackground)?,
            selected_border: theme.rgb(ColorRole::SelectedBorder)?,
            unselected_border: theme.rgb(ColorRole::UnselectedBorder)?,
            headline: theme.rgb(ColorRole::Headline)?,
            subtitle: theme.rgb(ColorRole::Subtitle)?,
            body_text: theme.rgb(ColorRole::BodyText)?,
            checkmark: theme.rgb(ColorRole::Checkmark)?,
            badge_background: theme.rgb(ColorRole::BadgeBackground)?,
            badge_text: theme.rgb(ColorRole::BadgeText)?,
            cta_background: theme.rgb(ColorRole::CtaBackground)?,
            cta_text: theme.rgb(ColorRole::CtaText)?,
            price_breakdown: theme.rgb(ColorRole::PriceBreakdown)?,
            footer_text: theme.rgb(ColorRole::FooterText)?,
            footer_separator: theme.rgb(ColorRole::FooterSeparator)?,
            price_label: theme.rgb(ColorRole::PriceLabel)?,
            price_period: theme.rgb(ColorRole::PricePeriod)?,
            price_name: theme.rgb(ColorRole::PriceName)?,
        })
    }
}
