//! Engine tunables and page-level configuration.
//!
//! Defaults come from `constants.rs`. Front-ends may override them from a
//! JSON config blob; every override goes through [`DepthConfig::validate`]
//! before an engine is built.

use crate::constants::{
    ACTIVE_BAND, APPROACH_BAND, DEFAULT_STARFIELD_SEED, FADE_RANGE, RENDER_BAND,
    SCROLL_TO_DEPTH_RATIO, STAR_COUNT,
};
use crate::gateway::{ChatConfig, ShopifyConfig, WooCommerceConfig};
use crate::section::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DepthConfig {
    pub scroll_to_depth_ratio: f32,
    pub active_band: f32,
    pub approach_band: f32,
    pub render_band: f32,
    pub fade_range: f32,
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            scroll_to_depth_ratio: SCROLL_TO_DEPTH_RATIO,
            active_band: ACTIVE_BAND,
            approach_band: APPROACH_BAND,
            render_band: RENDER_BAND,
            fade_range: FADE_RANGE,
        }
    }
}

impl DepthConfig {
    pub fn with_ratio(ratio: f32) -> Self {
        Self {
            scroll_to_depth_ratio: ratio,
            ..Self::default()
        }
    }

    /// Check the band relationships the engine relies on.
    ///
    /// An active section must always be renderable, so the active band has
    /// to sit strictly inside the render band.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("scrollToDepthRatio", self.scroll_to_depth_ratio),
            ("activeBand", self.active_band),
            ("approachBand", self.approach_band),
            ("renderBand", self.render_band),
            ("fadeRange", self.fade_range),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositiveTunable { name, value });
            }
        }
        if self.active_band >= self.render_band {
            return Err(ConfigError::BandOrder {
                inner: "activeBand",
                outer: "renderBand",
            });
        }
        if self.active_band > self.approach_band {
            return Err(ConfigError::BandOrder {
                inner: "activeBand",
                outer: "approachBand",
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StarfieldConfig {
    pub seed: u64,
    pub count: usize,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_STARFIELD_SEED,
            count: STAR_COUNT,
        }
    }
}

/// Page-level configuration: collaborator endpoints plus engine tunables.
///
/// Every field has a default, so an empty object (or a missing config
/// element) yields a working page with the collaborators switched off.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    pub depth: DepthConfig,
    pub starfield: StarfieldConfig,
    pub woocommerce: WooCommerceConfig,
    pub shopify: ShopifyConfig,
    pub chat: ChatConfig,
    pub currency_symbol: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            depth: DepthConfig::default(),
            starfield: StarfieldConfig::default(),
            woocommerce: WooCommerceConfig::default(),
            shopify: ShopifyConfig::default(),
            chat: ChatConfig::default(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.depth.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(DepthConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: DepthConfig = serde_json::from_str(r#"{"fadeRange": 12.0}"#).unwrap();
        assert_eq!(cfg.fade_range, 12.0);
        assert_eq!(cfg.active_band, ACTIVE_BAND);
    }

    #[test]
    fn active_band_must_be_inside_render_band() {
        let cfg = DepthConfig {
            active_band: 40.0,
            ..DepthConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::BandOrder { outer: "renderBand", .. })
        ));
    }

    #[test]
    fn store_config_from_empty_object() {
        let cfg = StoreConfig::from_json("{}").unwrap();
        assert_eq!(cfg, StoreConfig::default());
        assert!(!cfg.woocommerce.is_configured());
    }

    #[test]
    fn store_config_rejects_bad_depth_tunables() {
        let err = StoreConfig::from_json(r#"{"depth": {"renderBand": 10.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::BandOrder { .. }));
    }

    #[test]
    fn zero_ratio_is_rejected() {
        let cfg = DepthConfig::with_ratio(0.0);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositiveTunable { name: "scrollToDepthRatio", .. })
        ));
    }
}
