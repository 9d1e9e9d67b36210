/*!
geomap Command Line Interface

Renders map descriptions (JSON) into embeddable HTML for a mapping provider.

```bash
geomap render --provider bing --map store.json --include-js
geomap includes --provider google --config geomap.toml
geomap providers
```
*/

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

use geomap::config::{GeomapConfig, CONFIG_ENV};
use geomap::renderer::{render_page, RendererRegistry};
use geomap::{GeomapError, MapDescription, VERSION};

#[derive(Parser)]
#[command(name = "geomap")]
#[command(about = "Render provider-agnostic map descriptions as provider HTML")]
#[command(version = VERSION)]
pub struct Cli {
    /// Provider configuration file (TOML)
    #[arg(long, global = true, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render one map description, or a JSON array of them
    Render {
        /// Path to the JSON map description ("-" reads stdin)
        #[arg(long)]
        map: PathBuf,

        /// Provider key (defaults to the configured default provider)
        #[arg(long)]
        provider: Option<String>,

        /// Prepend the provider's library <script> tags
        #[arg(long)]
        include_js: bool,

        /// Output file path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the <script> tags that load a provider's library
    Includes {
        /// Provider key (defaults to the configured default provider)
        #[arg(long)]
        provider: Option<String>,
    },

    /// List available providers
    Providers,
}

/// A map file holds either one description or a JSON array of them
fn parse_maps(source: &str) -> geomap::Result<Vec<MapDescription>> {
    if source.trim_start().starts_with('[') {
        serde_json::from_str(source)
            .map_err(|e| GeomapError::InputError(format!("Invalid map description: {}", e)))
    } else {
        Ok(vec![MapDescription::from_json(source)?])
    }
}

/// One line per registered provider, marking the configured default
fn provider_listing(registry: &RendererRegistry, default_provider: &str) -> Vec<String> {
    registry
        .providers()
        .map(|name| {
            if name.eq_ignore_ascii_case(default_provider) {
                format!("{} (default)", name)
            } else {
                name.to_string()
            }
        })
        .collect()
}

fn load_config(path: Option<&Path>) -> geomap::Result<GeomapConfig> {
    match path {
        Some(path) => GeomapConfig::from_file(path),
        None => Ok(GeomapConfig::default()),
    }
}

fn read_maps(path: &Path) -> anyhow::Result<Vec<MapDescription>> {
    let source = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read map description from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read map description {}", path.display()))?
    };

    Ok(parse_maps(&source)?)
}

fn write_output(output: Option<&Path>, html: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, html)
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            info!("HTML written to {}", path.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only markup
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geomap=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let registry = RendererRegistry::from_config(&config);

    match cli.command {
        Commands::Render {
            map,
            provider,
            include_js,
            output,
        } => {
            let provider = provider.as_deref().unwrap_or(config.default_provider());
            let renderer = registry.get(provider)?;
            let maps = read_maps(&map)?;
            info!("Rendering {} map(s) with {}", maps.len(), renderer.name());

            let html = if include_js {
                render_page(renderer.as_ref(), &maps)
            } else {
                maps.iter().map(|m| renderer.render(m)).collect::<String>()
            };
            write_output(output.as_deref(), &html)?;
        }

        Commands::Includes { provider } => {
            let provider = provider.as_deref().unwrap_or(config.default_provider());
            println!("{}", registry.get(provider)?.render_javascript_includes());
        }

        Commands::Providers => {
            for line in provider_listing(&registry, config.default_provider()) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "geomap",
            "render",
            "--map",
            "store.json",
            "--provider",
            "bing",
            "--include-js",
        ])
        .unwrap();

        match cli.command {
            Commands::Render {
                map,
                provider,
                include_js,
                output,
            } => {
                assert_eq!(map, PathBuf::from("store.json"));
                assert_eq!(provider.as_deref(), Some("bing"));
                assert!(include_js);
                assert!(output.is_none());
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_global_config_after_subcommand() {
        let cli =
            Cli::try_parse_from(["geomap", "includes", "--config", "geomap.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("geomap.toml")));
    }

    #[test]
    fn test_parse_maps_single_and_many() {
        let one = parse_maps(r#"{"container_id": "a", "var_name": "va"}"#).unwrap();
        assert_eq!(one.len(), 1);

        let many = parse_maps(
            r#"
            [{"container_id": "a", "var_name": "va"}, {"container_id": "b", "var_name": "vb"}]"#,
        )
        .unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many[1].var_name, "vb");
    }

    #[test]
    fn test_parse_maps_keeps_field_error() {
        let err = parse_maps(r#"{"container_id": "map1"}"#).unwrap_err();
        assert!(matches!(err, GeomapError::InputError(_)));
        assert!(err.to_string().contains("missing field `var_name`"), "{}", err);

        let err = parse_maps(r#"[{"container_id": "map1"}]"#).unwrap_err();
        assert!(err.to_string().contains("missing field `var_name`"), "{}", err);
    }

    #[test]
    fn test_provider_listing_marks_default_case_insensitively() {
        let config = GeomapConfig::from_toml_str("default_provider = \"Google\"\n").unwrap();
        let registry = RendererRegistry::from_config(&config);
        assert_eq!(
            provider_listing(&registry, config.default_provider()),
            vec!["bing".to_string(), "google (default)".to_string()]
        );
    }

    #[test]
    fn test_read_maps_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        std::fs::write(
            &path,
            r#"{"container_id": "map1", "var_name": "mapA", "auto_zoom": true}"#,
        )
        .unwrap();

        let maps = read_maps(&path).unwrap();
        assert_eq!(maps.len(), 1);
        assert!(maps[0].auto_zoom);
    }

    #[test]
    fn test_read_maps_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        std::fs::write(&path, r#"{"container_id": "map1"}"#).unwrap();
        assert!(read_maps(&path).is_err());
    }

    #[test]
    fn test_load_config_without_path() {
        let config = load_config(None).unwrap();
        assert_eq!(config.default_provider(), "google");
    }
}
