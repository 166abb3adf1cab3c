// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Terraform Resource Documentation Generator
//!
//! Generates markdown reference documentation for every resource and data source
//! the provider serves, straight from their schemas.
//!
//! Usage:
//!   cargo run --bin tfdoc > docs/resources.md

use tfcrd::provider::Provider;
use tfcrd::schema::{Attribute, AttributeType, Schema};

fn main() {
    let provider = Provider::default();

    println!("# Resource Reference");
    println!();
    println!("> **Note**: This file is AUTO-GENERATED from the provider schemas");
    println!("> DO NOT EDIT MANUALLY - Run `cargo run --bin tfdoc` to regenerate");
    println!();

    println!("## Resources");
    println!();
    for name in provider.resource_type_names() {
        if let Some(resource) = provider.resource(&name) {
            generate_schema_doc(&name, &resource.schema());
        }
    }

    println!("## Data Sources");
    println!();
    for name in provider.data_source_type_names() {
        if let Some(data_source) = provider.data_source(&name) {
            generate_schema_doc(&name, &data_source.schema());
        }
    }
}

fn generate_schema_doc(type_name: &str, schema: &Schema) {
    println!("### `{type_name}`");
    println!();
    println!("{}", schema.description);
    println!();
    print_attribute_table(&schema.attributes, "");
    println!("---");
    println!();
}

/// One table row per attribute; nested objects are flattened with dotted paths.
fn print_attribute_table(attributes: &[Attribute], prefix: &str) {
    if prefix.is_empty() {
        println!("| Attribute | Type | Mode | Description |");
        println!("| --------- | ---- | ---- | ----------- |");
    }

    for attr in attributes {
        let path = if prefix.is_empty() {
            attr.name.clone()
        } else {
            format!("{prefix}.{}", attr.name)
        };
        println!(
            "| `{path}` | {} | {} | {} |",
            attr.attr_type,
            mode(attr),
            escape(&attr.description)
        );

        match &attr.attr_type {
            AttributeType::Object(nested) => print_attribute_table(nested, &path),
            AttributeType::List(elem) | AttributeType::Map(elem) => {
                if let AttributeType::Object(nested) = elem.as_ref() {
                    print_attribute_table(nested, &format!("{path}[*]"));
                }
            }
            _ => {}
        }
    }

    if prefix.is_empty() {
        println!();
    }
}

fn mode(attr: &Attribute) -> &'static str {
    if attr.required {
        "Required"
    } else if attr.is_computed_only() {
        "Read-Only"
    } else {
        "Optional"
    }
}

fn escape(description: &str) -> String {
    description.replace('|', "\\|").replace('\n', " ")
}
