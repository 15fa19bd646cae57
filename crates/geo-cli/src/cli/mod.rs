use clap::Parser;
use geo_config::CliCredentials;

pub mod global;

pub use global::{Blocks, GlobalFlags, OutputFormat};

/// Command-line parser for the `geoscope` binary.
#[derive(Debug, Parser)]
#[command(
    name = "geoscope",
    version,
    about = "GEO analytics reports for Rankscale brands"
)]
pub struct Cli {
    /// Rankscale API key (overrides RANKSCALE_API_KEY)
    #[arg(long, alias = "apiKey", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Brand ID (overrides RANKSCALE_BRAND_ID)
    #[arg(long, alias = "brandId", value_name = "ID")]
    pub brand_id: Option<String>,

    /// Brand name used to pick a brand when no ID is set
    #[arg(long, alias = "brandName", value_name = "NAME")]
    pub brand_name: Option<String>,

    /// List the brands on this account and exit
    #[arg(long)]
    pub discover_brands: bool,

    /// Show the per-engine visibility profile
    #[arg(long)]
    pub engine_profile: bool,

    /// Show engine and search-term content gaps
    #[arg(long)]
    pub gap_analysis: bool,

    /// Show the keyword-based reputation score
    #[arg(long)]
    pub reputation: bool,

    /// Output format: text, json
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only, no spinner)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }

    #[must_use]
    pub fn credentials(&self) -> CliCredentials {
        CliCredentials {
            api_key: self.api_key.clone(),
            brand_id: self.brand_id.clone(),
            brand_name: self.brand_name.clone(),
        }
    }

    #[must_use]
    pub const fn blocks(&self) -> Blocks {
        Blocks {
            engine_profile: self.engine_profile,
            gap_analysis: self.gap_analysis,
            reputation: self.reputation,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Blocks, Cli, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_full_text_report() {
        let cli = Cli::try_parse_from(["geoscope"]).expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.discover_brands);
        assert!(!cli.blocks().any());
        assert!(cli.api_key.is_none());
    }

    #[test]
    fn credential_flags_accept_camel_case_aliases() {
        let cli = Cli::try_parse_from([
            "geoscope",
            "--apiKey",
            "rk_abc_b1",
            "--brandId",
            "b1",
            "--brandName",
            "Acme",
        ])
        .expect("cli should parse");

        let creds = cli.credentials();
        assert_eq!(creds.api_key.as_deref(), Some("rk_abc_b1"));
        assert_eq!(creds.brand_id.as_deref(), Some("b1"));
        assert_eq!(creds.brand_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn block_flags_select_blocks() {
        let cli = Cli::try_parse_from(["geoscope", "--engine-profile", "--reputation"])
            .expect("cli should parse");
        assert_eq!(
            cli.blocks(),
            Blocks {
                engine_profile: true,
                gap_analysis: false,
                reputation: true,
            }
        );
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["geoscope", "--format", "xml"]).is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["geoscope", "-q", "-v"]).is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["geoscope", "--format", "json", "--verbose"])
            .expect("cli should parse");
        let flags = cli.global_flags();
        assert_eq!(flags.format, OutputFormat::Json);
        assert!(flags.verbose);
        assert!(!flags.quiet);
    }
}
