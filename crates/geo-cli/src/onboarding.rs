use geo_insights::text::{center, line};

/// Setup instructions shown when no API key is configured.
#[must_use]
pub fn render() -> String {
    [
        line('='),
        center("RANKSCALE SETUP REQUIRED"),
        line('='),
        String::new(),
        "  To use GEO Analytics, you need a Rankscale account.".into(),
        String::new(),
        "  1. Sign up at: https://app.rankscale.ai/signup".into(),
        "  2. Create your brand profile".into(),
        "  3. Copy your API key from Settings > API".into(),
        "  4. Set environment variables:".into(),
        String::new(),
        "     export RANKSCALE_API_KEY=rk_xxxxx_yyyyy".into(),
        "     export RANKSCALE_BRAND_ID=yyyyy".into(),
        String::new(),
        "  Or pass as flags:".into(),
        "     geoscope \\".into(),
        "       --api-key rk_xxxxx \\".into(),
        "       --brand-id yyyyy".into(),
        String::new(),
        "  Or add an [api] section to geoscope.toml.".into(),
        String::new(),
        line('='),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use geo_insights::text::WIDTH;

    use super::*;

    #[test]
    fn names_both_variables_and_fits_width() {
        let text = render();
        assert!(text.contains("RANKSCALE_API_KEY"));
        assert!(text.contains("RANKSCALE_BRAND_ID"));
        assert!(text.lines().all(|l| l.chars().count() <= WIDTH));
    }
}
