//! `banner` subcommand.

use gazeta_cli_utils::site::SiteConfig;

/// Header, footer and page-chrome settings for the given year.
pub fn banner_lines(site: &SiteConfig, year: i32) -> Vec<String> {
    vec![
        site.edition_banner(year),
        format!("© {year} Gazeta Marista"),
        format!(
            "Loading screen: {} ms",
            site.loading_screen_delay().as_millis()
        ),
        format!(
            "Sidebar: {}",
            if site.sidebar_enabled {
                "enabled"
            } else {
                "disabled"
            }
        ),
    ]
}
