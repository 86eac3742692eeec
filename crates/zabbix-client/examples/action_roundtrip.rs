//! Create, fetch and delete a discovery action on a live Zabbix frontend.
//!
//! ```text
//! ZABBIX_URL=https://zabbix.example.com/api_jsonrpc.php \
//! ZABBIX_USER=Admin ZABBIX_PASSWORD=zabbix \
//! RUST_LOG=zabbix_client=debug \
//! cargo run -p zabbix-client --example action_roundtrip
//! ```

use std::time::Duration;

use zabbix_client::{
    Action, ClientBuilder, Condition, Filter, Operation, OperationGroup, Params,
};

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = ClientBuilder::new()
        .with_url(env_or("ZABBIX_URL", "http://localhost/api_jsonrpc.php"))
        .with_timeout(Duration::from_secs(30))
        .build()?;

    println!("Zabbix API {}", client.version().await?);
    client
        .login(
            &env_or("ZABBIX_USER", "Admin"),
            &env_or("ZABBIX_PASSWORD", "zabbix"),
        )
        .await?;

    let actions = client.actions();
    let existing = actions.get(Params::new()).await?;
    println!("{} actions before", existing.len());

    let mut created = vec![Action {
        name: format!("rust-client-demo-{}", std::process::id()),
        eventsource: "2".into(),
        filter: Filter {
            evaltype: "0".into(),
            conditions: vec![Condition {
                conditiontype: "24".into(),
                operator: "2".into(),
                value: "Linux".into(),
            }],
        },
        operations: vec![Operation {
            operationtype: "4".into(),
            opgroup: vec![OperationGroup {
                groupid: "2".into(),
            }],
            ..Default::default()
        }],
        ..Default::default()
    }];
    actions.create(&mut created).await?;
    println!("created action {}", created[0].actionid);

    let fetched = actions.get_by_id(&created[0].actionid).await?;
    println!("fetched {:?}", fetched.name);

    actions.delete(&mut created).await?;
    println!("deleted; {} actions after", actions.get(Params::new()).await?.len());

    Ok(())
}
