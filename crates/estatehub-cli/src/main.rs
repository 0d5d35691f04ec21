// Rust guideline compliant 2026-10-12

//! EstateHub CLI Application
//!
//! Command-line console for EstateHub listings, inquiries and accounts.

use clap::Parser;
use estatehub_app::{CatalogOptions, ListOptions, RepoContext};
use estatehub_cli::{commands, create_formatter, should_use_color, OutputFormatter};
use estatehub_core::OutputFormat as ConfigFormat;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "estate",
    version,
    about = "EstateHub: listing and lead management",
    long_about = "EstateHub manages property listings, inquiries, user accounts and amenities. Records live in .estatehub/records.jsonl; filtering, sorting, paging and status transitions follow .estatehub/config.toml.",
    after_help = "Examples:\n  estate init\n  estate list listing --where 'price<=800000' --sort price --desc\n  estate list inquiry --search alice --in name,email\n  estate catalog --type villa --price 1000000+ --sort price-high\n  estate targets listing 3\n  estate transition inquiry 7 contacted\n  estate toggle listing 3 featured\n  estate role 4 agent\n"
)]
struct Cli {
    /// Enable JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Output format (defaults to the configured format)
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit log events as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Table,
    Plain,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Initialize a new EstateHub repository
    Init,

    /// List records of one kind
    List {
        /// Record kind: listing, inquiry, account or amenity
        kind: String,

        /// Case-insensitive text to search for
        #[arg(long)]
        search: Option<String>,

        /// Fields to search (defaults to every searchable field)
        #[arg(long = "in", value_delimiter = ',')]
        search_fields: Vec<String>,

        /// Filter clause such as 'price<=800000' or 'status=available'
        #[arg(long = "where")]
        clauses: Vec<String>,

        /// Sort field (defaults to created_at, newest first)
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: usize,

        /// Page size (defaults to the configured page size)
        #[arg(long)]
        size: Option<usize>,
    },

    /// Show the public catalog of available listings
    Catalog {
        /// Case-insensitive text to search for
        #[arg(long)]
        search: Option<String>,

        /// Property type facet, or 'all'
        #[arg(long = "type")]
        property_type: Option<String>,

        /// Price bucket: LOW-HIGH, LOW+ or 'all'
        #[arg(long)]
        price: Option<String>,

        /// Sort preset: newest, price-low, price-high or area
        #[arg(long)]
        sort: Option<String>,

        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: usize,

        /// Page size (defaults to the configured page size)
        #[arg(long)]
        size: Option<usize>,
    },

    /// Show one record
    Show {
        /// Record kind
        kind: String,

        /// Record ID
        id: String,
    },

    /// Show the statuses a record may move to
    Targets {
        /// Record kind
        kind: String,

        /// Record ID
        id: String,
    },

    /// Move a record to a new status
    Transition {
        /// Record kind
        kind: String,

        /// Record ID
        id: String,

        /// Target status
        status: String,
    },

    /// Flip a boolean flag (featured, email_verified)
    Toggle {
        /// Record kind
        kind: String,

        /// Record ID
        id: String,

        /// Flag field name
        field: String,
    },

    /// Change an account's role
    Role {
        /// Account ID
        id: String,

        /// New role: admin, agent or viewer
        role: String,
    },
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("ESTATEHUB_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let result = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    if let Err(e) = result {
        eprintln!("Failed to set tracing subscriber: {e}");
    }
}

/// Picks the output format: flags first, then the repository config.
fn resolve_format(cli: &Cli) -> &'static str {
    match cli.format {
        Some(OutputFormat::Json) => return "json",
        Some(OutputFormat::Table) => return "table",
        Some(OutputFormat::Plain) => return "plain",
        None if cli.json => return "json",
        None => {}
    }

    let configured = RepoContext::discover(None)
        .and_then(|repo| repo.load_config())
        .map(|config| config.output_format);
    match configured {
        Ok(ConfigFormat::Json) => "json",
        Ok(ConfigFormat::Plain) => "plain",
        Ok(ConfigFormat::Table) | Err(_) => "table",
    }
}

fn run(command: Commands, formatter: &dyn OutputFormatter) -> anyhow::Result<()> {
    match command {
        Commands::Init => commands::init::execute(formatter),
        Commands::List {
            kind,
            search,
            search_fields,
            clauses,
            sort,
            desc,
            page,
            size,
        } => commands::list::execute(
            kind,
            ListOptions {
                search,
                search_fields,
                clauses,
                sort,
                descending: desc,
                page,
                size,
            },
            formatter,
        ),
        Commands::Catalog {
            search,
            property_type,
            price,
            sort,
            page,
            size,
        } => commands::catalog::execute(
            CatalogOptions {
                search,
                property_type,
                price,
                sort,
                page,
                size,
            },
            formatter,
        ),
        Commands::Show { kind, id } => commands::show::execute(kind, id, formatter),
        Commands::Targets { kind, id } => commands::targets::execute(kind, id, formatter),
        Commands::Transition { kind, id, status } => {
            commands::transition::execute(kind, id, status, formatter)
        }
        Commands::Toggle { kind, id, field } => {
            commands::toggle::execute(kind, id, field, formatter)
        }
        Commands::Role { id, role } => commands::role::execute(id, role, formatter),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let use_color = !cli.no_color && should_use_color();
    let format = resolve_format(&cli);
    let formatter = create_formatter(format, use_color);
    tracing::debug!(format, use_color, "output configured");

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    if let Err(error) = run(command, formatter.as_ref()) {
        if format == "json" {
            println!("{}", formatter.format_error(&error));
        } else {
            eprintln!("{}", formatter.format_error(&error));
        }
        std::process::exit(1);
    }

    Ok(())
}
