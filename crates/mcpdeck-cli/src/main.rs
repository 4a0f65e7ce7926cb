//! CLI entry point - the composition root.
//!
//! Command dispatch routes to handlers which delegate to AppCore. All
//! CLI code uses CliContext for dependency access - no direct store or
//! filesystem access outside of bootstrap.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mcpdeck_cli::{
    CategoryCommand, Cli, Commands, KeyCommand, ServerCommand, TargetCommand, bootstrap, handlers,
};

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "mcpdeck=debug,info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    // Bootstrap the CLI context (composition root)
    let ctx = bootstrap(cli.data_dir.as_deref()).await?;

    match command {
        Commands::Server(command) => match command {
            ServerCommand::Add {
                name,
                value,
                command,
                args,
                description,
            } => handlers::servers::add(&ctx, &name, value, command, args, description).await?,
            ServerCommand::List => handlers::servers::list(&ctx).await?,
            ServerCommand::Update { id, name, value } => {
                handlers::servers::update(&ctx, &id, name, value).await?;
            }
            ServerCommand::Remove { id } => handlers::servers::remove(&ctx, &id).await?,
        },
        Commands::Category(command) => match command {
            CategoryCommand::Create {
                name,
                description,
                icon,
                target,
            } => handlers::categories::create(&ctx, &name, description, &icon, &target).await?,
            CategoryCommand::List { target } => handlers::categories::list(&ctx, target).await?,
            CategoryCommand::Update {
                id,
                name,
                description,
                icon,
                target,
            } => handlers::categories::update(&ctx, &id, name, description, icon, target).await?,
            CategoryCommand::Remove { id } => handlers::categories::remove(&ctx, &id).await?,
            CategoryCommand::Servers { id } => handlers::categories::servers(&ctx, &id).await?,
            CategoryCommand::Attach {
                category_id,
                server_id,
                order,
            } => handlers::categories::attach(&ctx, &category_id, &server_id, order).await?,
            CategoryCommand::Detach {
                category_id,
                server_id,
            } => handlers::categories::detach(&ctx, &category_id, &server_id).await?,
        },
        Commands::Target(command) => match command {
            TargetCommand::Add { name, config_path } => {
                handlers::targets::add(&ctx, &name, &config_path).await?;
            }
            TargetCommand::List => handlers::targets::list(&ctx).await?,
            TargetCommand::Update {
                id,
                name,
                config_path,
            } => handlers::targets::update(&ctx, &id, name, config_path).await?,
            TargetCommand::Remove { id } => handlers::targets::remove(&ctx, &id).await?,
        },
        Commands::Key(command) => match command {
            KeyCommand::Add { name, value } => handlers::keys::add(&ctx, &name, &value).await?,
            KeyCommand::List => handlers::keys::list(&ctx).await?,
            KeyCommand::Remove { id } => handlers::keys::remove(&ctx, &id).await?,
            KeyCommand::Bind {
                server_id,
                key_id,
                env_name,
            } => handlers::keys::bind(&ctx, &server_id, &key_id, &env_name).await?,
        },
        Commands::Activate {
            category_id,
            target,
            restart,
            process_name,
            app_path,
        } => {
            handlers::activation::activate(
                &ctx,
                &category_id,
                &target,
                restart,
                process_name,
                app_path,
            )
            .await?;
        }
        Commands::Preview {
            category_id,
            target,
        } => handlers::activation::preview(&ctx, &category_id, &target).await?,
        Commands::Import {
            category_name,
            file,
            target,
            icon,
            description,
        } => {
            handlers::activation::import(&ctx, &category_name, file, &target, &icon, description)
                .await?;
        }
        Commands::Select { target } => handlers::status::select(&ctx, &target).await?,
        Commands::Status => handlers::status::status(&ctx).await?,
        Commands::Reset { yes } => handlers::status::reset(&ctx, yes).await?,
    }

    Ok(())
}
