//! Operator bootstrap — seeds the Admin role and the first admin account.
//!
//! # Usage
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo run -p admin-cli -- \
//!     --name "Jane Mukasa" --email jane@example.com \
//!     --phone-number +256700000001 --password 'a-long-password'
//! ```
//!
//! Safe to re-run: an existing `admin` role keeps its id and gets the full
//! permission catalog again. Exits 1 when the email or phone is taken.

use anyhow::{Context as _, Result, bail};
use chrono::Utc;
use clap::Parser;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, TransactionTrait,
};
use uuid::Uuid;

use skylift_api::usecase::session::hash_password;
use skylift_api_schema::{employee_roles, employees, users};
use skylift_domain::employee::EmployeeType;
use skylift_domain::permission::Permission;

#[derive(Parser)]
#[command(about = "Seed the Admin role and create the first admin account")]
struct Args {
    /// Admin's full name
    #[arg(long)]
    name: String,

    /// Unique email address
    #[arg(long)]
    email: String,

    /// Unique phone number, with country code
    #[arg(long)]
    phone_number: String,

    /// Login password, 8 characters minimum
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    if args.password.chars().count() < 8 {
        bail!("password must be at least 8 characters");
    }

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let db = Database::connect(&database_url)
        .await
        .context("connect to database")?;

    let role_id = upsert_admin_role(&db).await?;

    let taken = users::Entity::find()
        .filter(
            users::Column::Email
                .eq(args.email.as_str())
                .or(users::Column::PhoneNumber.eq(args.phone_number.as_str())),
        )
        .one(&db)
        .await
        .context("check for an existing user")?;
    if taken.is_some() {
        bail!("a user with this email or phone number already exists");
    }

    let hashed_password = hash_password(args.password.clone())
        .await
        .context("hash password")?;
    let photo_url = url::Url::parse_with_params(
        "https://api.dicebear.com/9.x/initials/png",
        [("seed", args.name.as_str())],
    )
    .context("build avatar URL")?
    .to_string();

    let name = args.name.clone();
    let email = args.email.clone();
    let phone_number = args.phone_number.clone();
    db.transaction::<_, (), sea_orm::DbErr>(|txn| {
        Box::pin(async move {
            let now = Utc::now();
            let user = users::ActiveModel {
                id: Set(Uuid::now_v7()),
                name: Set(name),
                email: Set(Some(email)),
                phone_number: Set(Some(phone_number)),
                photo_url: Set(Some(photo_url)),
                hashed_password: Set(hashed_password),
                is_active: Set(true),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(txn)
            .await?;

            employees::ActiveModel {
                id: Set(Uuid::now_v7()),
                user_account_id: Set(user.id),
                employee_type: Set(EmployeeType::Admin.as_str().to_owned()),
                is_online: Set(false),
                role_id: Set(Some(role_id)),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(txn)
            .await?;

            Ok(())
        })
    })
    .await
    .context("create admin user")?;

    println!("Admin user \"{}\" created with email {}", args.name, args.email);
    Ok(())
}

/// Find the `admin` role by slug, creating it when missing. Either way it
/// ends up holding the full permission catalog.
async fn upsert_admin_role(db: &DatabaseConnection) -> Result<Uuid> {
    let permissions = employee_roles::PermissionList(
        Permission::ALL.iter().map(|p| p.name().to_owned()).collect(),
    );

    match employee_roles::Entity::find()
        .filter(employee_roles::Column::Slug.eq("admin"))
        .one(db)
        .await
        .context("find admin role")?
    {
        Some(existing) => {
            let id = existing.id;
            let mut role = existing.into_active_model();
            role.permissions = Set(permissions);
            role.updated_at = Set(Utc::now());
            role.update(db).await.context("refresh admin role")?;
            println!("Admin role already exists; refreshed its permissions.");
            Ok(id)
        }
        None => {
            let now = Utc::now();
            let role = employee_roles::ActiveModel {
                id: Set(Uuid::now_v7()),
                name: Set("Admin".to_owned()),
                slug: Set("admin".to_owned()),
                permissions: Set(permissions),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(db)
            .await
            .context("create admin role")?;
            println!("Created Admin role with the full permission catalog.");
            Ok(role.id)
        }
    }
}
