//! CLI command implementations.
//!
//! - `ichnome-front serve` runs the front-end server
//! - `ichnome-front render <url>` renders one page to stdout
//! - `ichnome-front check <workspace>` checks that the backend answers
//! - `ichnome-front config show|init|set` manages configuration

use anyhow::{Context, Result, bail};
use colored::Colorize;
use tiny_http::Method;

use crate::api::types::GetGroupsResponse;
use crate::api::{ApiClient, endpoints, fetch_json};
use crate::config::{self, FrontConfig};
use crate::render::Site;
use crate::web::{self, Frontend};

fn frontend(config: &FrontConfig) -> Frontend<ApiClient> {
    Frontend::new(ApiClient::from_config(config), Site::from_config(config))
}

// ---------------------------------------------------------------------------
// ichnome-front serve
// ---------------------------------------------------------------------------

/// Run the server until interrupted. `address` overrides the configured one.
pub fn run_serve(address: Option<String>) -> Result<()> {
    let cfg = config::load();
    let address = address.unwrap_or_else(|| cfg.server.address.clone());

    println!(
        "{} serving http://{} (backend {})",
        cfg.general.application_name.bold().cyan(),
        address,
        cfg.api.endpoint_url.dimmed()
    );
    println!("Press Ctrl+C to stop.\n");

    web::serve(&address, &frontend(&cfg))
}

// ---------------------------------------------------------------------------
// ichnome-front render
// ---------------------------------------------------------------------------

/// Dispatch one front-end URL (e.g. `/main/stats/default?limit=5`) and print
/// the result.
pub fn run_render(url: &str) -> Result<()> {
    let url = if url.starts_with('/') {
        url.to_string()
    } else {
        format!("/{url}")
    };
    let reply = frontend(&config::load()).dispatch(&Method::Get, &url);

    match reply.status {
        200 => {
            print!("{}", reply.body);
            Ok(())
        }
        303 => {
            println!("{}", reply.location.unwrap_or_default());
            Ok(())
        }
        status => bail!("{url}: {status} {}", reply.body),
    }
}

// ---------------------------------------------------------------------------
// ichnome-front check
// ---------------------------------------------------------------------------

/// Fetch the workspace's group list and report what came back.
pub fn run_check(workspace: &str) -> Result<()> {
    let cfg = config::load();
    let client = ApiClient::from_config(&cfg);
    let request = endpoints::groups(cfg.general.vocabulary, workspace);

    println!("{}", "ichnome backend check".bold().cyan());
    println!("{}", "=".repeat(40));
    print_check_item("Endpoint", true, client.base_url());
    print_check_item("Vocabulary", true, &cfg.general.vocabulary.to_string());

    match fetch_json::<GetGroupsResponse, _>(&client, &request) {
        Ok(response) => {
            let names: Vec<&str> = response.groups.iter().map(|g| g.name.as_str()).collect();
            print_check_item(
                &format!("Workspace '{workspace}'"),
                true,
                &format!("{} {}", names.len(), cfg.general.vocabulary.groups_segment()),
            );
            for name in names {
                println!("      {}", name);
            }
            Ok(())
        }
        Err(e) => {
            print_check_item(&format!("Workspace '{workspace}'"), false, &e.to_string());
            Err(e).with_context(|| format!("GET {}", request.url(client.base_url())))
        }
    }
}

fn print_check_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<25} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// ichnome-front config show | init | set
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    for path in [config::global_config_file(), config::project_config_file()]
        .into_iter()
        .flatten()
    {
        let shown = path.display().to_string();
        if path.exists() {
            println!("  {} {}", "✓".green(), shown.dimmed());
        } else {
            println!("  {} {} (not found)", "·".dimmed(), shown.dimmed());
        }
    }
    println!(
        "  {} {}",
        "·".dimmed(),
        "ICHNOME_* environment variables".dimmed()
    );
    Ok(())
}

/// Write the default config to `~/.ichnome-front/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Set one dotted key in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}
