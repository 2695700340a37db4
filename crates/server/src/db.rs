use diesel::prelude::*;
use diesel_async::{
    pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager, ManagerConfig},
    AsyncPgConnection, RunQueryDsl,
};

use crate::models::{NewUser, User};

pub type DbPool = Pool<AsyncPgConnection>;

async fn establish_tls_connection(config: String) -> diesel::ConnectionResult<AsyncPgConnection> {
    // Set up rustls TLS configuration
    let root_store =
        rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();
    let tls = tokio_postgres_rustls::MakeRustlsConnect::new(tls_config);

    // Parse the connection string and connect with TLS
    let (client, connection) = tokio_postgres::connect(&config, tls)
        .await
        .map_err(|e| diesel::ConnectionError::BadConnection(e.to_string()))?;

    // Spawn the connection task
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("Connection error: {}", e);
        }
    });

    // Build the async connection from the tokio-postgres client
    AsyncPgConnection::try_from(client).await
}

pub fn establish_connection_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let mut manager_config = ManagerConfig::default();
    manager_config.custom_setup =
        Box::new(|url| Box::pin(establish_tls_connection(url.to_string())));

    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new_with_config(
        database_url,
        manager_config,
    );
    let pool = Pool::builder(config).build()?;

    Ok(pool)
}

// User database operations
pub mod users {
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    /// Outcome of an insert attempt. A taken username is an expected
    /// condition, not a transport failure, so it gets its own variant
    /// instead of being folded into the error path.
    #[derive(Debug)]
    pub enum InsertOutcome {
        Created(User),
        UsernameTaken,
    }

    pub async fn insert(
        conn: &mut AsyncPgConnection,
        username_val: &str,
        password_hash: &str,
    ) -> Result<InsertOutcome, DieselError> {
        use crate::schema::users::dsl::*;

        let result = diesel::insert_into(users)
            .values(NewUser {
                username: username_val,
                password: password_hash,
            })
            .get_result::<User>(conn)
            .await;

        match result {
            Ok(user) => Ok(InsertOutcome::Created(user)),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Ok(InsertOutcome::UsernameTaken)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn find_by_username(
        conn: &mut AsyncPgConnection,
        name: &str,
    ) -> Result<Option<User>, DieselError> {
        use crate::schema::users::dsl::*;

        users
            .filter(username.eq(name))
            .first::<User>(conn)
            .await
            .optional()
    }

    pub async fn list_all(conn: &mut AsyncPgConnection) -> Result<Vec<User>, DieselError> {
        use crate::schema::users::dsl::*;

        users.order_by(created_at.desc()).load::<User>(conn).await
    }
}
