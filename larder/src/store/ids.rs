// This file is part of the product Larder.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use uuid::Uuid;

const BASE36_DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LENGTH: usize = 6;

/// Builds a record identifier from the current Unix time in milliseconds
/// (base-36) plus a random base-36 suffix, so records created within the
/// same millisecond still get distinct ids without any coordination.
pub fn generate_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
    format!("{}{}", encode_base36(millis), random_suffix(SUFFIX_LENGTH))
}

fn encode_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize] as char);
        value /= 36;
    }
    digits.iter().rev().collect()
}

fn random_suffix(length: usize) -> String {
    Uuid::new_v4()
        .into_bytes()
        .iter()
        .take(length)
        .map(|byte| SUFFIX_DIGITS[(*byte as usize) % SUFFIX_DIGITS.len()] as char)
        .collect()
}
