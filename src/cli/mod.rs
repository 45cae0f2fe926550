//! CLI for the FTask admin client.
//!
//! Provides subcommands over the FTask REST API:
//! - `login` / `logout` / `whoami` - session management
//! - `bookings`, `partners`, `users` - admin resource tables
//! - `catalogs`, `districts`, `variants` - service catalog data
//! - `notifications`, `transactions`, `dashboard` - the rest of the surface

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use crate::api::{self, PageQuery};
use crate::client::ApiClient;

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "ftask-admin")]
#[command(author, version, about = "Admin client for the FTask booking platform", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ftask.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// API URL to connect to (overrides the config file)
    #[arg(long, env = "FTASK_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with phone + OTP
    Login {
        /// Phone number to receive the OTP
        phone: String,
        /// OTP code; prompted for interactively when omitted
        #[arg(long)]
        otp: Option<String>,
        /// Role to authenticate as
        #[arg(long, default_value = api::auth::DEFAULT_ROLE)]
        role: String,
    },

    /// Drop the stored session
    Logout,

    /// Show the current session and profile
    Whoami,

    /// Booking management commands
    #[command(subcommand)]
    Bookings(BookingsCommands),

    /// Partner management commands
    #[command(subcommand)]
    Partners(PartnersCommands),

    /// User management commands
    #[command(subcommand)]
    Users(UsersCommands),

    /// Service catalog commands
    #[command(subcommand)]
    Catalogs(CatalogsCommands),

    /// List districts the platform operates in
    Districts,

    /// Notification commands
    #[command(subcommand)]
    Notifications(NotificationsCommands),

    /// Transaction commands
    #[command(subcommand)]
    Transactions(TransactionsCommands),

    /// Show the admin dashboard overview
    Dashboard,
}

#[derive(Subcommand, Debug)]
pub enum BookingsCommands {
    /// List all bookings
    List {
        #[arg(short, long, default_value = "0")]
        page: u32,
        #[arg(short, long, default_value = "20")]
        size: u32,
    },
    /// Show details for a booking
    Show { id: String },
    /// Cancel a booking
    Cancel {
        id: String,
        /// Reason shown to the customer
        #[arg(long)]
        reason: String,
    },
    /// Force a booking status
    SetStatus { id: String, status: String },
}

#[derive(Subcommand, Debug)]
pub enum PartnersCommands {
    /// List all partners
    List {
        #[arg(short, long, default_value = "0")]
        page: u32,
        #[arg(short, long, default_value = "20")]
        size: u32,
    },
    /// Show details for a partner
    Show { id: String },
    /// List a partner's bookings
    Bookings { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommands {
    /// List all users
    List {
        #[arg(short, long, default_value = "0")]
        page: u32,
        #[arg(short, long, default_value = "20")]
        size: u32,
    },
    /// Activate or deactivate an account
    SetStatus {
        id: String,
        #[arg(long)]
        active: bool,
    },
    /// Change an account's role
    SetRole { id: String, role_id: String },
}

#[derive(Subcommand, Debug)]
pub enum CatalogsCommands {
    /// List service catalogs
    List,
    /// Create a service catalog
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a service catalog
    Delete { id: String },
    /// List variants under a catalog
    Variants,
}

#[derive(Subcommand, Debug)]
pub enum NotificationsCommands {
    /// List notifications with unread count
    List,
    /// Mark every notification as read
    ReadAll,
}

#[derive(Subcommand, Debug)]
pub enum TransactionsCommands {
    /// List transactions
    List {
        #[arg(short, long, default_value = "0")]
        page: u32,
        #[arg(short, long, default_value = "20")]
        size: u32,
    },
    /// Show the total platform fee collected
    TotalFee,
}

impl Commands {
    /// View path this command corresponds to; the client suppresses
    /// session-expired notices on the login view.
    pub fn view_path(&self) -> &'static str {
        match self {
            Commands::Login { .. } => "/login",
            Commands::Logout => "/logout",
            Commands::Whoami => "/profile",
            Commands::Bookings(_) => "/bookings",
            Commands::Partners(_) => "/partners",
            Commands::Users(_) => "/users",
            Commands::Catalogs(_) => "/service-catalogs",
            Commands::Districts => "/districts",
            Commands::Notifications(_) => "/notifications",
            Commands::Transactions(_) => "/transactions",
            Commands::Dashboard => "/dashboard",
        }
    }
}

/// Run a CLI command
pub async fn run_command(cli: &Cli, client: &ApiClient) -> Result<()> {
    match &cli.command {
        Commands::Login { phone, otp, role } => cmd_login(client, phone, otp.as_deref(), role).await,
        Commands::Logout => cmd_logout(client),
        Commands::Whoami => cmd_whoami(client).await,
        Commands::Bookings(cmd) => cmd_bookings(client, cmd).await,
        Commands::Partners(cmd) => cmd_partners(client, cmd).await,
        Commands::Users(cmd) => cmd_users(client, cmd).await,
        Commands::Catalogs(cmd) => cmd_catalogs(client, cmd).await,
        Commands::Districts => cmd_districts(client).await,
        Commands::Notifications(cmd) => cmd_notifications(client, cmd).await,
        Commands::Transactions(cmd) => cmd_transactions(client, cmd).await,
        Commands::Dashboard => cmd_dashboard(client).await,
    }
}

// -------------------------------------------------------------------------
// Session commands
// -------------------------------------------------------------------------

async fn cmd_login(
    client: &ApiClient,
    phone: &str,
    otp: Option<&str>,
    role: &str,
) -> Result<()> {
    let otp = match otp {
        Some(otp) => otp.to_string(),
        None => {
            api::auth::send_otp(client, phone)
                .await
                .context("Failed to request an OTP")?;
            println!("OTP sent to {}.", phone);
            prompt("Enter OTP: ")?
        }
    };

    let user = api::auth::login(client, phone, otp.trim(), role)
        .await
        .context("Login failed")?;

    println!();
    println!("[OK] Logged in as {}", user.full_name.as_deref().unwrap_or(&user.id));
    Ok(())
}

fn cmd_logout(client: &ApiClient) -> Result<()> {
    api::auth::logout(client);
    println!("[OK] Logged out.");
    Ok(())
}

async fn cmd_whoami(client: &ApiClient) -> Result<()> {
    if !client.store().is_authenticated() {
        println!("Not logged in. Run 'ftask-admin login <phone>' first.");
        return Ok(());
    }

    let user = api::users::me(client)
        .await
        .context("Failed to fetch current user")?;
    client.store().set_user_info(&user);

    println!();
    println!("ID:     {}", user.id);
    println!("Name:   {}", user.full_name.as_deref().unwrap_or("-"));
    println!("Phone:  {}", user.phone.as_deref().unwrap_or("-"));
    println!("Email:  {}", user.email.as_deref().unwrap_or("-"));
    println!("Role:   {}", user.role.as_deref().unwrap_or("-"));
    println!();
    Ok(())
}

// -------------------------------------------------------------------------
// Resource commands
// -------------------------------------------------------------------------

async fn cmd_bookings(client: &ApiClient, cmd: &BookingsCommands) -> Result<()> {
    match cmd {
        BookingsCommands::List { page, size } => {
            let query = PageQuery::default().page(*page).size(*size);
            let bookings = api::bookings::admin::list(client, &query)
                .await
                .context("Failed to fetch bookings")?;

            println!();
            println!(
                "{:<36}  {:<12}  {:<20}  {:<12}",
                "ID", "STATUS", "START", "TOTAL"
            );
            println!("{}", "-".repeat(86));
            for booking in &bookings.content {
                println!(
                    "{:<36}  {:<12}  {:<20}  {:<12}",
                    booking.id,
                    booking.status.as_deref().unwrap_or("-"),
                    booking
                        .start_at
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    booking
                        .total_price
                        .map(|p| format!("{:.0}", p))
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            print_page_footer(bookings.number, bookings.total_pages, bookings.total_elements);
        }
        BookingsCommands::Show { id } => {
            let booking = api::bookings::admin::get(client, id)
                .await
                .context("Failed to fetch booking")?;
            println!();
            println!("ID:       {}", booking.id);
            println!("Status:   {}", booking.status.as_deref().unwrap_or("-"));
            println!(
                "Start:    {}",
                booking
                    .start_at
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string())
            );
            println!("Address:  {}", booking.address.as_deref().unwrap_or("-"));
            println!("Note:     {}", booking.note.as_deref().unwrap_or("-"));
            println!();
        }
        BookingsCommands::Cancel { id, reason } => {
            api::bookings::admin::cancel(client, id, reason)
                .await
                .context("Failed to cancel booking")?;
            println!("[OK] Booking {} cancelled.", id);
        }
        BookingsCommands::SetStatus { id, status } => {
            api::bookings::admin::update_status(client, id, status)
                .await
                .context("Failed to update booking status")?;
            println!("[OK] Booking {} set to {}.", id, status);
        }
    }
    Ok(())
}

async fn cmd_partners(client: &ApiClient, cmd: &PartnersCommands) -> Result<()> {
    match cmd {
        PartnersCommands::List { page, size } => {
            let query = PageQuery::default().page(*page).size(*size);
            let partners = api::partners::admin::list(client, &query)
                .await
                .context("Failed to fetch partners")?;

            println!();
            println!(
                "{:<36}  {:<24}  {:<14}  {:<10}  {:<6}",
                "ID", "NAME", "PHONE", "STATUS", "RATING"
            );
            println!("{}", "-".repeat(98));
            for partner in &partners.content {
                println!(
                    "{:<36}  {:<24}  {:<14}  {:<10}  {:<6}",
                    partner.id,
                    truncate(partner.full_name.as_deref().unwrap_or("-"), 24),
                    partner.phone.as_deref().unwrap_or("-"),
                    partner.status.as_deref().unwrap_or("-"),
                    partner
                        .average_rating
                        .map(|r| format!("{:.1}", r))
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            print_page_footer(partners.number, partners.total_pages, partners.total_elements);
        }
        PartnersCommands::Show { id } => {
            let partner = api::partners::admin::get(client, id)
                .await
                .context("Failed to fetch partner")?;
            println!();
            println!("ID:      {}", partner.id);
            println!("Name:    {}", partner.full_name.as_deref().unwrap_or("-"));
            println!("Phone:   {}", partner.phone.as_deref().unwrap_or("-"));
            println!("Status:  {}", partner.status.as_deref().unwrap_or("-"));
            if let Some(districts) = &partner.districts {
                let names: Vec<&str> = districts.iter().map(|d| d.name.as_str()).collect();
                println!("Districts: {}", names.join(", "));
            }
            println!();
        }
        PartnersCommands::Bookings { id } => {
            let bookings =
                api::partners::admin::bookings(client, id, &PageQuery::default()).await?;
            println!();
            for booking in &bookings.content {
                println!(
                    "{:<36}  {}",
                    booking.id,
                    booking.status.as_deref().unwrap_or("-")
                );
            }
            print_page_footer(bookings.number, bookings.total_pages, bookings.total_elements);
        }
    }
    Ok(())
}

async fn cmd_users(client: &ApiClient, cmd: &UsersCommands) -> Result<()> {
    match cmd {
        UsersCommands::List { page, size } => {
            let query = PageQuery::default().page(*page).size(*size);
            let users = api::users::admin::list(client, &query)
                .await
                .context("Failed to fetch users")?;

            println!();
            println!(
                "{:<36}  {:<24}  {:<14}  {:<10}  {:<6}",
                "ID", "NAME", "PHONE", "ROLE", "ACTIVE"
            );
            println!("{}", "-".repeat(98));
            for user in &users.content {
                println!(
                    "{:<36}  {:<24}  {:<14}  {:<10}  {:<6}",
                    user.id,
                    truncate(user.full_name.as_deref().unwrap_or("-"), 24),
                    user.phone.as_deref().unwrap_or("-"),
                    user.role.as_deref().unwrap_or("-"),
                    user.is_active
                        .map(|a| if a { "yes" } else { "no" })
                        .unwrap_or("-"),
                );
            }
            print_page_footer(users.number, users.total_pages, users.total_elements);
        }
        UsersCommands::SetStatus { id, active } => {
            api::users::admin::set_status(client, id, *active)
                .await
                .context("Failed to update user status")?;
            println!(
                "[OK] User {} {}.",
                id,
                if *active { "activated" } else { "deactivated" }
            );
        }
        UsersCommands::SetRole { id, role_id } => {
            api::users::admin::set_role(client, id, role_id)
                .await
                .context("Failed to update user role")?;
            println!("[OK] User {} role set to {}.", id, role_id);
        }
    }
    Ok(())
}

async fn cmd_catalogs(client: &ApiClient, cmd: &CatalogsCommands) -> Result<()> {
    match cmd {
        CatalogsCommands::List => {
            let catalogs = api::catalogs::list(client)
                .await
                .context("Failed to fetch service catalogs")?;
            println!();
            println!("{:<36}  {:<24}  {:<6}", "ID", "NAME", "ACTIVE");
            println!("{}", "-".repeat(70));
            for catalog in &catalogs {
                println!(
                    "{:<36}  {:<24}  {:<6}",
                    catalog.id,
                    truncate(&catalog.name, 24),
                    catalog
                        .is_active
                        .map(|a| if a { "yes" } else { "no" })
                        .unwrap_or("-"),
                );
            }
            println!();
        }
        CatalogsCommands::Create { name, description } => {
            let catalog = api::catalogs::admin::create(
                client,
                &api::catalogs::CatalogUpsert {
                    name: name.clone(),
                    description: description.clone(),
                    icon_url: None,
                },
            )
            .await
            .context("Failed to create service catalog")?;
            println!("[OK] Created catalog {} ({}).", catalog.name, catalog.id);
        }
        CatalogsCommands::Delete { id } => {
            api::catalogs::admin::delete(client, id)
                .await
                .context("Failed to delete service catalog")?;
            println!("[OK] Catalog {} deleted.", id);
        }
        CatalogsCommands::Variants => {
            let variants = api::variants::list(client, &PageQuery::default())
                .await
                .context("Failed to fetch service variants")?;
            println!();
            println!("{:<36}  {:<24}  {:<10}", "ID", "NAME", "PRICE");
            println!("{}", "-".repeat(74));
            for variant in &variants.content {
                println!(
                    "{:<36}  {:<24}  {:<10}",
                    variant.id,
                    truncate(&variant.name, 24),
                    variant
                        .base_price
                        .map(|p| format!("{:.0}", p))
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            println!();
        }
    }
    Ok(())
}

async fn cmd_districts(client: &ApiClient) -> Result<()> {
    let districts = api::districts::list(client)
        .await
        .context("Failed to fetch districts")?;
    println!();
    for district in &districts {
        println!("{:<36}  {}", district.id, district.name);
    }
    println!();
    println!("{} district(s).", districts.len());
    Ok(())
}

async fn cmd_notifications(client: &ApiClient, cmd: &NotificationsCommands) -> Result<()> {
    match cmd {
        NotificationsCommands::List => {
            // The count is cosmetic; a failed fetch must not look like zero.
            let unread = api::notifications::unread_count(client).await.ok();
            let notifications = api::notifications::list(client)
                .await
                .context("Failed to fetch notifications")?;
            println!();
            for n in &notifications {
                let marker = match n.is_read {
                    Some(false) => "*",
                    _ => " ",
                };
                println!(
                    "{} {:<30}  {}",
                    marker,
                    truncate(n.title.as_deref().unwrap_or("-"), 30),
                    n.content.as_deref().unwrap_or(""),
                );
            }
            println!();
            match unread {
                Some(unread) => {
                    println!("{} notification(s), {} unread.", notifications.len(), unread)
                }
                None => println!("{} notification(s), unread count unavailable.", notifications.len()),
            }
        }
        NotificationsCommands::ReadAll => {
            api::notifications::mark_all_read(client)
                .await
                .context("Failed to mark notifications as read")?;
            println!("[OK] All notifications marked as read.");
        }
    }
    Ok(())
}

async fn cmd_transactions(client: &ApiClient, cmd: &TransactionsCommands) -> Result<()> {
    match cmd {
        TransactionsCommands::List { page, size } => {
            let query = PageQuery::default().page(*page).size(*size);
            let transactions = api::transactions::admin::list(client, &query)
                .await
                .context("Failed to fetch transactions")?;
            println!();
            println!(
                "{:<36}  {:<10}  {:<12}  {:<10}",
                "ID", "TYPE", "AMOUNT", "STATUS"
            );
            println!("{}", "-".repeat(74));
            for tx in &transactions.content {
                println!(
                    "{:<36}  {:<10}  {:<12}  {:<10}",
                    tx.id,
                    tx.transaction_type.as_deref().unwrap_or("-"),
                    tx.amount
                        .map(|a| format!("{:.0}", a))
                        .unwrap_or_else(|| "-".to_string()),
                    tx.status.as_deref().unwrap_or("-"),
                );
            }
            print_page_footer(
                transactions.number,
                transactions.total_pages,
                transactions.total_elements,
            );
        }
        TransactionsCommands::TotalFee => {
            let fee = api::transactions::admin::total_fee(client)
                .await
                .context("Failed to fetch total fee")?;
            println!("Total platform fee: {:.0}", fee);
        }
    }
    Ok(())
}

async fn cmd_dashboard(client: &ApiClient) -> Result<()> {
    let stats = api::dashboard::stats(client)
        .await
        .context("Failed to fetch dashboard stats")?;

    println!();
    println!("=== FTask Dashboard ===");
    println!();
    println!("Bookings:  {}", stats.total_bookings);
    println!("Users:     {}", stats.total_users);
    println!("Partners:  {}", stats.total_partners);
    println!("Revenue:   {:.0}", stats.total_revenue);
    println!();
    Ok(())
}

// -------------------------------------------------------------------------
// Helper Functions
// -------------------------------------------------------------------------

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    std::io::stdout().flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line)
}

fn print_page_footer(number: u32, total_pages: u32, total_elements: u64) {
    println!();
    println!(
        "Page {}/{} ({} total).",
        number + 1,
        total_pages.max(1),
        total_elements
    );
}

/// Truncate a string to max length with ellipsis. Cuts on char
/// boundaries; names and titles here are routinely Vietnamese text.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_command_maps_to_login_view() {
        let cmd = Commands::Login {
            phone: "0901234567".to_string(),
            otp: None,
            role: "CUSTOMER".to_string(),
        };
        assert_eq!(cmd.view_path(), "/login");
    }

    #[test]
    fn test_resource_commands_map_to_their_views() {
        assert_eq!(Commands::Dashboard.view_path(), "/dashboard");
        assert_eq!(Commands::Districts.view_path(), "/districts");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-name", 10), "a-very-...");
    }

    #[test]
    fn test_truncate_multibyte_names() {
        // Cutting inside a multibyte char must not panic.
        assert_eq!(truncate("đđđđđđđđđđđđđ", 24), "đđđđđđđđđđđđđ");
        assert_eq!(truncate("Nguyễn Thị Hồng Phương x", 10), "Nguyễn ...");
        assert_eq!(truncate("đđđđđđđđđđđđđ", 10), "đđđđđđđ...");
    }
}
