// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Field customization descriptors.
//
// Declarative list of the affordances the host injects into its business
// entities during setup: a "Verify X" trigger button paired with a
// read-only "Is X Verified" check box. Each trigger invokes exactly one
// verification operation. The host owns the rendering and the migration
// hook; this module only describes what to inject.

use serde::Serialize;

use crate::types::VerificationKind;

/// Business entities that receive verification fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Entity {
    #[serde(rename = "Bank Account")]
    BankAccount,
    Driver,
    Employee,
}

impl Entity {
    pub const ALL: [Entity; 3] = [Self::BankAccount, Self::Driver, Self::Employee];

    /// Host document type name.
    pub fn doctype(&self) -> &'static str {
        match self {
            Self::BankAccount => "Bank Account",
            Self::Driver => "Driver",
            Self::Employee => "Employee",
        }
    }

    /// Case-insensitive lookup by doctype name, ignoring spaces and dashes.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "bankaccount" => Some(Self::BankAccount),
            "driver" => Some(Self::Driver),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }
}

/// Host field type of an injected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Button,
    Check,
}

/// One field the host should inject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub fieldname: &'static str,
    pub label: &'static str,
    pub fieldtype: FieldType,
    pub insert_after: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<&'static str>,
    pub read_only: bool,
}

/// A trigger/indicator pair bound to one verification operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationAffordance {
    pub entity: Entity,
    pub kind: VerificationKind,
    pub trigger: FieldSpec,
    pub indicator: FieldSpec,
}

impl VerificationAffordance {
    /// Both fields in insertion order.
    pub fn fields(&self) -> [&FieldSpec; 2] {
        [&self.trigger, &self.indicator]
    }
}

struct Pair {
    kind: VerificationKind,
    anchor: &'static str,
    depends_on: Option<&'static str>,
    button: (&'static str, &'static str),
    check: (&'static str, &'static str),
}

fn affordance(entity: Entity, pair: Pair) -> VerificationAffordance {
    let (button_name, button_label) = pair.button;
    let (check_name, check_label) = pair.check;
    VerificationAffordance {
        entity,
        kind: pair.kind,
        trigger: FieldSpec {
            fieldname: button_name,
            label: button_label,
            fieldtype: FieldType::Button,
            insert_after: pair.anchor,
            depends_on: pair.depends_on,
            read_only: false,
        },
        indicator: FieldSpec {
            fieldname: check_name,
            label: check_label,
            fieldtype: FieldType::Check,
            insert_after: button_name,
            depends_on: None,
            read_only: true,
        },
    }
}

/// Verification affordances for one entity, in insertion order.
pub fn entity_fields(entity: Entity) -> Vec<VerificationAffordance> {
    let pairs = match entity {
        Entity::BankAccount => vec![
            Pair {
                kind: VerificationKind::BankAccount,
                anchor: "bank_account_no",
                depends_on: Some("eval:doc.bank_account_no"),
                button: ("custom_verify_bank_account", "Verify Bank Account"),
                check: ("is_bank_account_verified", "Is Bank Account Verified"),
            },
            Pair {
                kind: VerificationKind::Upi,
                anchor: "custom_upi_id",
                depends_on: Some("eval:doc.custom_upi_id"),
                button: ("custom_verify_upi_id", "Verify UPI ID"),
                check: ("custom_is_upi_verified", "Is UPI Verified"),
            },
        ],
        Entity::Driver => vec![Pair {
            kind: VerificationKind::DrivingLicense,
            anchor: "license_number",
            depends_on: None,
            button: ("custom_verify_driving_license", "Verify Driving license"),
            check: ("custom_driving_license_verified", "Is Driving license Verified"),
        }],
        Entity::Employee => vec![
            Pair {
                kind: VerificationKind::GenerateOtp,
                anchor: "custom_mobile_number",
                depends_on: Some("eval: doc.custom_mobile_number"),
                button: ("custom_verify_mobile", "Verify Mobile"),
                check: ("custom_is_mobile_no_verified", "Is Mobile Verified"),
            },
            Pair {
                kind: VerificationKind::Aadhaar,
                anchor: "custom_aadhar_number",
                depends_on: Some("eval: doc.custom_aadhar_number"),
                button: ("custom_verify_aadhar", "Verify Aadhar"),
                check: ("custom_is_aadhar_verified", "Is Aadhar Verified"),
            },
            Pair {
                kind: VerificationKind::AadhaarOcr,
                anchor: "custom_aadhar_card_back_image",
                depends_on: Some("eval: doc.custom_aadhar_card_front_image"),
                button: ("custom_verify_aadhar_ocr", "Verify Aadhaar OCR"),
                check: ("custom_is_aadhar_ocr_verified", "Is Aadhar OCR Verified"),
            },
            Pair {
                kind: VerificationKind::Pan,
                anchor: "custom_pan",
                depends_on: Some("eval:doc.custom_pan"),
                button: ("custom_verify_pan", "Verify PAN"),
                check: ("custom_is_pan_verified", "Is PAN Verified"),
            },
        ],
    };

    pairs.into_iter().map(|p| affordance(entity, p)).collect()
}

/// Every affordance across all entities.
pub fn all_customizations() -> Vec<VerificationAffordance> {
    Entity::ALL.into_iter().flat_map(entity_fields).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn indicators_follow_their_trigger_and_are_read_only() {
        for aff in all_customizations() {
            assert_eq!(aff.trigger.fieldtype, FieldType::Button);
            assert_eq!(aff.indicator.fieldtype, FieldType::Check);
            assert!(aff.indicator.read_only);
            assert_eq!(aff.indicator.insert_after, aff.trigger.fieldname);
        }
    }

    #[test]
    fn fieldnames_are_unique_per_entity() {
        for entity in Entity::ALL {
            let names: Vec<_> = entity_fields(entity)
                .iter()
                .flat_map(|a| a.fields().map(|f| f.fieldname))
                .collect();
            let unique: HashSet<_> = names.iter().collect();
            assert_eq!(names.len(), unique.len(), "{entity:?}");
        }
    }

    #[test]
    fn bank_account_exposes_account_and_upi_checks() {
        let kinds: Vec<_> = entity_fields(Entity::BankAccount)
            .iter()
            .map(|a| a.kind)
            .collect();
        assert_eq!(kinds, vec![VerificationKind::BankAccount, VerificationKind::Upi]);
    }

    #[test]
    fn entity_lookup_is_lenient() {
        assert_eq!(Entity::from_name("Bank Account"), Some(Entity::BankAccount));
        assert_eq!(Entity::from_name("bank-account"), Some(Entity::BankAccount));
        assert_eq!(Entity::from_name("EMPLOYEE"), Some(Entity::Employee));
        assert_eq!(Entity::from_name("Supplier"), None);
    }

    #[test]
    fn serializes_with_host_doctype_names() {
        let json = serde_json::to_value(entity_fields(Entity::BankAccount)).unwrap();
        assert_eq!(json[0]["entity"], "Bank Account");
        assert_eq!(json[0]["kind"], "bank_account");
        assert_eq!(json[0]["trigger"]["fieldtype"], "Button");
        assert!(json[0]["indicator"].get("depends_on").is_none());
    }
}
