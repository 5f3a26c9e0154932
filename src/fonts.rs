//! Font resolution with whole-family fallback

use futures::future::try_join_all;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::host::Host;
use crate::layout::FontName;
use crate::{Error, Result};

/// One family and its spellings of the four weights the screen uses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontFamily {
    pub family: String,
    pub regular: String,
    pub semi_bold: String,
    pub bold: String,
    pub extra_bold: String,
}

impl FontFamily {
    pub fn nunito() -> Self {
        Self {
            family: "Nunito".into(),
            regular: "Regular".into(),
            semi_bold: "SemiBold".into(),
            bold: "Bold".into(),
            extra_bold: "ExtraBold".into(),
        }
    }

    pub fn inter() -> Self {
        Self {
            family: "Inter".into(),
            regular: "Regular".into(),
            semi_bold: "Semi Bold".into(),
            bold: "Bold".into(),
            extra_bold: "Extra Bold".into(),
        }
    }

    pub fn font_set(&self) -> FontSet {
        let font = |style: &str| FontName::new(self.family.clone(), style);
        FontSet {
            regular: font(&self.regular),
            semi_bold: font(&self.semi_bold),
            bold: font(&self.bold),
            extra_bold: font(&self.extra_bold),
        }
    }
}

/// The four resolved fonts, all from the same family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSet {
    pub regular: FontName,
    pub semi_bold: FontName,
    pub bold: FontName,
    pub extra_bold: FontName,
}

impl FontSet {
    pub fn all(&self) -> [&FontName; 4] {
        [&self.regular, &self.semi_bold, &self.bold, &self.extra_bold]
    }
}

/// Load the first family whose four weights all load.
///
/// The weights of a family are requested together; if any one fails the
/// whole family is abandoned and the next is tried, so the returned set never
/// mixes families.
pub async fn load_fonts<H: Host + ?Sized>(host: &H, families: &[FontFamily]) -> Result<FontSet> {
    for family in families {
        let set = family.font_set();
        let requests = set.all().into_iter().map(|f| host.load_font(f.clone()));
        match try_join_all(requests).await {
            Ok(_) => {
                info!("Loaded font family '{}'", family.family);
                return Ok(set);
            }
            Err(e) => warn!("Font family '{}' unavailable: {}", family.family, e),
        }
    }
    Err(Error::FontLoadFailure {
        families: families.iter().map(|f| f.family.clone()).collect(),
    })
}
