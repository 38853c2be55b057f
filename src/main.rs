//! opcua-flow - run a persisted flow against one injected message
//!
//! Usage: `opcua-flow <flow.json> <node-id>`; the message is read as JSON
//! from stdin (empty input sends an empty payload). Every message leaving
//! the OPC UA nodes is printed as one JSON line.
//!
//! `opcua-flow --list` prints the registered node types by palette section.

use std::error::Error;
use std::io::Read;
use std::process::ExitCode;

use log::{error, info};

use opcua_flow_nodes::{FlowEngine, Message, NodeRegistry};

fn run(flow_path: &str, node_id: &str) -> Result<(), Box<dyn Error>> {
    let flow_json = std::fs::read_to_string(flow_path)?;
    let registry = NodeRegistry::with_opcua_nodes();
    let mut engine = FlowEngine::from_json(&registry, &flow_json)?;

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let msg = if input.trim().is_empty() {
        Message::default()
    } else {
        serde_json::from_str(&input)?
    };

    for delivery in engine.inject(node_id, msg)? {
        println!("{}", serde_json::to_string(&delivery.message)?);
    }

    let stats = engine.stats();
    info!(
        "Processed {} node input(s): {} emitted, {} failed",
        stats.processed, stats.emitted, stats.failed
    );
    Ok(())
}

fn list() {
    let registry = NodeRegistry::with_opcua_nodes();
    for (section, node_types) in registry.palette() {
        println!("{}", section);
        for node_type in node_types {
            let description = registry
                .get_metadata(node_type)
                .map(|metadata| metadata.description)
                .unwrap_or_default();
            println!("  {:<16} {}", node_type, description);
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("--list") {
        list();
        return ExitCode::SUCCESS;
    }
    let [_, flow_path, node_id] = args.as_slice() else {
        eprintln!("usage: opcua-flow <flow.json> <node-id> | opcua-flow --list");
        return ExitCode::from(2);
    };

    match run(flow_path, node_id) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
