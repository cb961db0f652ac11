use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

use detectr::client::RulesClient;
use detectr::config::{Cli, Command};
use detectr::domain::RuleIdOnly;
use detectr::observability::init_tracing;
use detectr::rules::{load_rule_ids, load_rules};
use detectr::transport::HttpTransport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse configuration
    let cli = Cli::parse();
    let config = cli.config;

    // Initialize tracing
    init_tracing(&config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        kibana_url = %config.kibana_url,
        "Starting detectr"
    );

    let transport = HttpTransport::new(&config).context("failed to build HTTP transport")?;
    let client = RulesClient::new(transport);

    let result = run(&client, cli.command).await;

    if config.print_metrics {
        eprint!("{}", client.metrics().to_prometheus());
    }

    result
}

async fn run(client: &RulesClient<HttpTransport>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::EnsureIndex => {
            client.ensure_detection_index().await?;
            println!("detection index ready");
        }

        Command::Create { path } => {
            let rules = load_rules(&path)
                .with_context(|| format!("failed to load rules from {}", path.display()))?;

            info!(path = %path.display(), count = rules.len(), "Creating detection rules");

            for created in client.bulk_create_rules(&rules).await? {
                println!("{}", created.rule_id);
            }
        }

        Command::Delete { file, rule_ids } => {
            let mut rules: Vec<RuleIdOnly> = rule_ids.into_iter().map(RuleIdOnly::new).collect();

            if let Some(path) = file {
                let from_file = load_rule_ids(&path)
                    .with_context(|| format!("failed to load rules from {}", path.display()))?;
                rules.extend(from_file);
            }

            if rules.is_empty() {
                bail!("no rules to delete; pass rule ids or --file");
            }

            client.bulk_delete(&rules).await?;
            println!("deleted {} rule(s)", rules.len());
        }

        Command::Hits => {
            let result = client.get_hits().await?;

            if result.is_empty() {
                println!("no open signals");
                return Ok(());
            }

            println!("{} open signal(s)", result.total());
            for name in result.rule_names() {
                println!("  {name}");
            }
        }

        Command::CloseSignals => {
            client.close_signals().await?;
            println!("open signals closed");
        }
    }

    Ok(())
}
