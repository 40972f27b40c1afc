//! Badge rendering and badge artifact naming.

use badge_maker::BadgeBuilder;

use crate::error::{HoistError, Result};
use crate::report::REPORT_SUFFIX;
use crate::score::Tier;

/// Render an SVG badge with `label` on the left and `status` on the right,
/// colored by `tier`.
pub fn render_badge(label: &str, status: &str, tier: Tier) -> Result<String> {
    let badge = BadgeBuilder::new()
        .label(label)
        .message(status)
        .color_parse(tier.color())
        .build()
        .map_err(|err| HoistError::Other(format!("badge render failed: {err}")))?;
    Ok(badge.svg())
}

/// Name of the badge file written next to a report.
///
/// `home.report.json` becomes `home.<label>.svg`.
pub fn badge_file_name(report_file_name: &str, label: &str) -> String {
    match report_file_name.strip_suffix(REPORT_SUFFIX) {
        Some(base) => format!("{base}.{label}.svg"),
        None => format!("{report_file_name}.{label}.svg"),
    }
}

#[cfg(test)]
mod tests {
    use super::{badge_file_name, render_badge};
    use crate::score::Tier;

    #[test]
    fn render_badge_embeds_label_and_status() {
        let svg = render_badge("performance", "93%", Tier::Green).expect("render badge");
        assert!(svg.contains("<svg"));
        assert!(svg.contains("performance"));
        assert!(svg.contains("93%"));
    }

    #[test]
    fn render_badge_accepts_every_tier_color() {
        for tier in [Tier::Red, Tier::Orange, Tier::Green] {
            assert!(render_badge("seo", "42%", tier).is_ok());
        }
    }

    #[test]
    fn render_badge_carries_nan_status_through() {
        let svg = render_badge("accessibility", "NaN%", Tier::Green).expect("render badge");
        assert!(svg.contains("NaN%"));
    }

    #[test]
    fn badge_file_name_swaps_report_suffix() {
        assert_eq!(
            badge_file_name("home.report.json", "performance"),
            "home.performance.svg"
        );
        assert_eq!(
            badge_file_name("pricing.report.json", "seo"),
            "pricing.seo.svg"
        );
    }

    #[test]
    fn badge_file_name_appends_when_suffix_is_absent() {
        assert_eq!(badge_file_name("home.json", "seo"), "home.json.seo.svg");
    }
}
