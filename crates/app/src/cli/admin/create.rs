use clap::Args;
use parceltrack_app::{
    auth::{DEFAULT_SESSION_TTL_SECONDS, NewAdmin, PgAuthService},
    database,
};

#[derive(Debug, Args)]
pub(crate) struct CreateAdminArgs {
    /// Admin email address, used to sign in
    #[arg(long)]
    email: String,

    /// Admin display name
    #[arg(long, default_value = "")]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateAdminArgs) -> Result<(), String> {
    if args.email.trim().is_empty() {
        return Err("email cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(pool, DEFAULT_SESSION_TTL_SECONDS);

    let issued = service
        .create_admin(NewAdmin {
            email: args.email,
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create admin: {error}"))?;

    println!("admin_uuid: {}", issued.admin.uuid);
    println!("admin_email: {}", issued.admin.email);
    println!("admin_created_at: {}", issued.admin.created_at);
    println!("access_key: {}", issued.access_key);
    println!("store this key now; it is only shown once");

    Ok(())
}
