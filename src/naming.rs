// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Attribute naming.
//!
//! Kubernetes fields are camelCase; Terraform attribute names are lowercase with
//! underscores. Runs of capitals are treated as one word (`clusterIPs` becomes
//! `cluster_ips`, `hostIPC` becomes `host_ipc`), except that the last capital of a
//! run starts a new word when a lowercase letter other than a plural `s` follows
//! (`HTTPGet` becomes `http_get`, `targetWWNs` stays `target_wwns`).

/// Convert a Kubernetes field name into a Terraform attribute name.
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == '.' || c == '$' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            continue;
        }

        if c.is_ascii_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let prev_is_lower = prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
            let prev_is_upper = prev.is_some_and(|p| p.is_ascii_uppercase());
            // A trailing lowercase `s` pluralizes the run (`WWNs`) rather than starting a word.
            let plural = next == Some('s')
                && chars.get(i + 2).is_none_or(|after| !after.is_ascii_lowercase());
            let next_is_lower = next.is_some_and(|n| n.is_ascii_lowercase()) && !plural;
            // Capital run of two or more followed by a word: split before the last capital.
            let run_before = chars[..i]
                .iter()
                .rev()
                .take_while(|p| p.is_ascii_uppercase())
                .count();
            let ends_run = prev_is_upper && next_is_lower && run_before >= 2;

            if (prev_is_lower || ends_run) && !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
