use anyhow::{Context, Result};
use dvault::config::VaultConfig;
use dvault::database::ItemDb;
use dvault::workspace::{ItemRecord, Workspace};

fn print_usage() {
    println!("Usage: vault_cli [--conf FILE] [--list] [--show ID]");
    println!();
    println!("  --conf FILE  configuration (default conf/vault.yaml)");
    println!("  --list       list the containers found in save_dir (default)");
    println!("  --show ID    list the items of one container");
}

fn print_row(row: &ItemRecord) {
    println!(
        "{:<14} {:<36} {:<24} {:<22} {:<36} {:>4} {:>4} {:>4} {:>4}",
        row.location,
        row.name,
        row.base_type,
        row.quality,
        row.affixes,
        row.ilvl,
        row.req_str,
        row.req_mag,
        row.req_dex
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut conf_file = "conf/vault.yaml".to_string();
    let mut show: Option<String> = None;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "--h" | "--?" | "/?" => {
                print_usage();
                return Ok(());
            }
            "--conf" => {
                if i + 1 < args.len() {
                    i += 1;
                    conf_file = args[i].clone();
                } else {
                    eprintln!("Error: --conf requires a FILE argument");
                    return Ok(());
                }
            }
            "--show" => {
                if i + 1 < args.len() {
                    i += 1;
                    show = Some(args[i].to_ascii_lowercase());
                } else {
                    eprintln!("Error: --show requires an ID argument");
                    return Ok(());
                }
            }
            "--list" => {}
            other => {
                eprintln!("Error: unknown argument {other}");
                print_usage();
                return Ok(());
            }
        }
        i += 1;
    }

    let config = VaultConfig::from_file(&conf_file)
        .with_context(|| format!("Cannot load config: {}", conf_file))?;

    let mut workspace = Workspace::new();
    workspace.set_hero_entry(config.hero_entry.clone());
    let count = workspace
        .open(&config.save_dir)
        .with_context(|| format!("Cannot open save directory: {}", config.save_dir))?;

    let Some(id) = show else {
        println!("{count} container(s) in {}", config.save_dir);
        for c in workspace.containers() {
            let packing = if c.is_packed() { "packed" } else { "dir" };
            let kind = format!("{:?}", c.kind);
            println!("{:<20} {:<16} {:<6} {}", c.id, kind, packing, c.display_name);
        }
        return Ok(());
    };

    let db = ItemDb::from_directory(&config.txtdata_dir)
        .with_context(|| format!("Cannot load item tables: {}", config.txtdata_dir))?;

    let rows = workspace
        .load_items_for(&id, &db, config.variant)
        .with_context(|| format!("Cannot list container: {}", id))?;

    tracing::info!("[vault_cli] {} rows from {}", rows.len(), id);
    println!(
        "{:<14} {:<36} {:<24} {:<22} {:<36} {:>4} {:>4} {:>4} {:>4}",
        "Location", "Name", "Base", "Quality", "Affixes", "iLvl", "Str", "Mag", "Dex"
    );
    for row in &rows {
        print_row(row);
    }
    Ok(())
}
