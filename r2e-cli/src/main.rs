mod commands;

use clap::{Parser, Subcommand};
use commands::{add, dev, doctor, generate, new_project, routes};

#[derive(Parser)]
#[command(name = "r2e", version, about = "R2E CLI — scaffold and manage R2E projects")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new R2E project
    New {
        /// Project name
        name: String,
        /// Include WebSocket support
        #[arg(long)]
        ws: bool,
        /// Include multipart upload support
        #[arg(long)]
        multipart: bool,
        /// Include request validation
        #[arg(long)]
        validation: bool,
        /// Include all features
        #[arg(long)]
        full: bool,
        /// Skip interactive prompts (use defaults)
        #[arg(long)]
        no_interactive: bool,
    },
    /// Generate a controller, service, CRUD, or middleware
    Generate {
        #[command(subcommand)]
        kind: GenerateKind,
    },
    /// Enable an r2e Cargo feature in the project
    Add {
        /// Feature name (e.g. ws, multipart, validation, dev-reload)
        extension: String,
    },
    /// Start the dev server with Subsecond hot-reload
    Dev {
        /// Server port (forwarded as R2E_PORT env var)
        #[arg(long)]
        port: Option<u16>,
        /// Extra Cargo features to enable
        #[arg(long, num_args = 1..)]
        features: Vec<String>,
    },
    /// Check project health
    Doctor,
    /// List all declared routes
    Routes,
}

#[derive(Subcommand)]
enum GenerateKind {
    /// Generate a new controller
    Controller {
        /// Controller name (e.g. UserController)
        name: String,
    },
    /// Generate a new service
    Service {
        /// Service name (e.g. UserService)
        name: String,
    },
    /// Generate a complete CRUD (controller + service + model + tests)
    Crud {
        /// Entity name in PascalCase (e.g. User, BlogPost)
        name: String,
        /// Fields in format "name:type" (e.g. "name:String email:String age:i64")
        #[arg(long, num_args = 1..)]
        fields: Vec<String>,
    },
    /// Generate a middleware/interceptor
    Middleware {
        /// Middleware name (e.g. AuditLog)
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::New {
            name,
            ws,
            multipart,
            validation,
            full,
            no_interactive,
        } => new_project::run(
            &name,
            new_project::CliNewOpts {
                ws,
                multipart,
                validation,
                full,
                no_interactive,
            },
        ),
        Commands::Generate { kind } => match kind {
            GenerateKind::Controller { name } => generate::controller(&name),
            GenerateKind::Service { name } => generate::service(&name),
            GenerateKind::Crud { name, fields } => generate::crud(&name, &fields),
            GenerateKind::Middleware { name } => generate::middleware(&name),
        },
        Commands::Add { extension } => add::run(&extension),
        Commands::Dev { port, features } => dev::run(port, features),
        Commands::Doctor => doctor::run(),
        Commands::Routes => routes::run(),
    };

    if let Err(e) = result {
        eprintln!("{}", colored::Colorize::red(format!("Error: {e}").as_str()));
        std::process::exit(1);
    }
}
