//! User search example
//!
//! This example demonstrates:
//! - Declaring filter operations on a query builder
//! - Reading filters from a nested JSON payload
//! - Per-resource options loaded from YAML
//! - Filtering a `validator`-checked request struct
//!
//! Run with `RUST_LOG=filterable=trace` to see every dispatch decision.

use anyhow::Result;
use filterable::prelude::*;
use tracing_subscriber::EnvFilter;

/// A tiny SQL builder standing in for a real query layer
#[derive(Debug, Default)]
struct UserQuery {
    clauses: Vec<String>,
}

impl UserQuery {
    fn where_eq(&mut self, column: &str, value: impl std::fmt::Display) -> &mut Self {
        self.clauses.push(format!("{} = '{}'", column, value));
        self
    }

    fn where_in(&mut self, column: &str, values: &[&str]) -> &mut Self {
        let list: Vec<String> = values.iter().map(|v| format!("'{}'", v)).collect();
        self.clauses
            .push(format!("{} IN ({})", column, list.join(", ")));
        self
    }

    fn to_sql(&self) -> String {
        if self.clauses.is_empty() {
            "SELECT * FROM users".to_string()
        } else {
            format!("SELECT * FROM users WHERE {}", self.clauses.join(" AND "))
        }
    }
}

impl Filterable for UserQuery {
    fn register_filters(registry: &mut FilterRegistry<Self>) {
        registry
            .on("status", |query, args| {
                args.exactly(1)?;
                query.where_eq("status", args.str(0)?);
                Ok(())
            })
            .on("role", |query, args| {
                args.at_least(1)?;
                query.where_in("role", &args.strings()?);
                Ok(())
            })
            .on("company_id", |query, args| {
                query.where_eq("company_id", args.uuid(0)?);
                Ok(())
            })
            .on("created_after", |query, args| {
                let date = args.date(0, "%Y-%m-%d")?;
                query
                    .clauses
                    .push(format!("created_at > '{}'", date.format("%Y-%m-%d")));
                Ok(())
            });
    }
}

#[derive(Debug, Serialize, Validate)]
struct UserSearch {
    #[validate(length(min = 1, max = 20))]
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,

    #[validate(length(max = 5))]
    role: Vec<String>,
}

const CONFIG: &str = r#"
resources:
  user:
    prefix: filters
    except: [password]
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🔎 Filterable User Search Example\n");

    let config = FilterConfig::from_yaml_str(CONFIG)?;
    let options = config.options_for("user");
    let registry = config.registry_for::<UserQuery>();
    println!("✅ Registered operations: {:?}\n", registry.operation_names());

    // JSON payload with the filters nested under "filters"
    let payload = JsonPayload::new(json!({
        "page": 1,
        "filters": {
            "status": "active",
            "role": ["admin", "editor"],
            "created_after": "2024-01-01",
            "password": "hunter2",
            "shoe_size": 44
        }
    }));

    let mut query = UserQuery::default();
    query.filter(&payload, &options)?;
    println!("📋 From JSON payload:\n   {}\n", query.to_sql());

    // Validated request struct
    let request = Validated::new(UserSearch {
        status: Some("pending".to_string()),
        role: vec!["viewer".to_string()],
    })?;

    let mut query = UserQuery::default();
    query.filter(&request, &FilterOptions::new().only(["status", "role"]))?;
    println!("📋 From validated struct:\n   {}\n", query.to_sql());

    // Invalid arguments surface as typed errors
    let bad = JsonPayload::new(json!({"company_id": "not-a-uuid"}));
    let mut query = UserQuery::default();
    if let Err(e) = query.filter(&bad, &FilterOptions::new()) {
        println!("❌ {} ({})", e, e.error_code());
    }

    Ok(())
}
