//! Per-resource behaviour as data.
//!
//! Every collection shares one set of CRUD operations; what differs between
//! them (labels, password redaction, list filters, delete reply) lives in the
//! [`RESOURCES`] table.

use serde_json::Value;

use crate::storage::Record;

pub const PASSWORD_FIELD: &str = "password";

/// How a list query parameter is compared with a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Match {
    /// String equality ignoring case.
    IgnoreCaseEq,
    /// Case-insensitive substring of the field.
    IgnoreCaseContains,
    /// Field value is a number less than or equal to the parameter.
    AtMost,
    /// Exact string equality.
    Exact,
}

#[derive(Debug, Clone, Copy)]
pub struct Filter {
    pub param: &'static str,
    pub field: &'static str,
    pub rule: Match,
}

impl Filter {
    const fn new(param: &'static str, rule: Match) -> Self {
        Self { param, field: param, rule }
    }

    /// A record without the field never matches.
    pub fn matches(&self, record: &Record, wanted: &str) -> bool {
        let Some(value) = record.get(self.field) else { return false };
        match self.rule {
            Match::IgnoreCaseEq => value.as_str().is_some_and(|s| s.to_lowercase() == wanted.to_lowercase()),
            Match::IgnoreCaseContains => {
                value.as_str().is_some_and(|s| s.to_lowercase().contains(&wanted.to_lowercase()))
            }
            Match::Exact => value.as_str().is_some_and(|s| s == wanted),
            Match::AtMost => match (as_number(value), wanted.trim().parse::<f64>()) {
                (Some(have), Ok(limit)) => have <= limit,
                _ => false,
            },
        }
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Answer sent after a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteReply {
    /// 200 with `{"message": "<Label> deleted successfully"}`.
    Message,
    /// 204 with an empty body.
    NoContent,
}

#[derive(Debug)]
pub struct ResourceSpec {
    /// Collection and route name, e.g. `properties`.
    pub name: &'static str,
    /// Singular label used in messages, e.g. `Property`.
    pub label: &'static str,
    pub strips_password: bool,
    pub filters: &'static [Filter],
    pub delete_reply: DeleteReply,
    /// Served by the shared list/get/create/update/delete routes.
    pub generic_routes: bool,
}

impl ResourceSpec {
    pub fn deleted_message(&self) -> String {
        format!("{} deleted successfully", self.label)
    }

    /// Remove fields that must never leave the server on reads.
    pub fn redact(&self, mut record: Record) -> Record {
        if self.strips_password {
            record.remove(PASSWORD_FIELD);
        }
        record
    }

    /// Every filter whose parameter is present must match.
    pub fn matches<'q, I>(&self, record: &Record, query: I) -> bool
    where
        I: IntoIterator<Item = (&'q str, &'q str)>,
    {
        query.into_iter().all(|(param, wanted)| {
            self.filters
                .iter()
                .filter(|f| f.param == param)
                .all(|f| f.matches(record, wanted))
        })
    }
}

pub static USERS: ResourceSpec = ResourceSpec {
    name: "users",
    label: "User",
    strips_password: true,
    filters: &[Filter::new("username", Match::IgnoreCaseEq), Filter::new("email", Match::IgnoreCaseEq)],
    delete_reply: DeleteReply::Message,
    generic_routes: false,
};

pub static HOSTS: ResourceSpec = ResourceSpec {
    name: "hosts",
    label: "Host",
    strips_password: true,
    filters: &[Filter::new("name", Match::IgnoreCaseEq)],
    delete_reply: DeleteReply::Message,
    generic_routes: true,
};

pub static PROPERTIES: ResourceSpec = ResourceSpec {
    name: "properties",
    label: "Property",
    strips_password: false,
    filters: &[
        Filter::new("location", Match::IgnoreCaseEq),
        Filter::new("pricePerNight", Match::AtMost),
        Filter::new("amenities", Match::IgnoreCaseContains),
    ],
    delete_reply: DeleteReply::NoContent,
    generic_routes: true,
};

pub static AMENITIES: ResourceSpec = ResourceSpec {
    name: "amenities",
    label: "Amenity",
    strips_password: false,
    filters: &[],
    delete_reply: DeleteReply::Message,
    generic_routes: true,
};

pub static BOOKINGS: ResourceSpec = ResourceSpec {
    name: "bookings",
    label: "Booking",
    strips_password: false,
    filters: &[Filter::new("userId", Match::Exact)],
    delete_reply: DeleteReply::NoContent,
    generic_routes: true,
};

pub static REVIEWS: ResourceSpec = ResourceSpec {
    name: "reviews",
    label: "Review",
    strips_password: false,
    filters: &[],
    delete_reply: DeleteReply::Message,
    generic_routes: true,
};

/// All collections, in seeding (dependency) order.
pub static RESOURCES: [&ResourceSpec; 6] = [&USERS, &HOSTS, &PROPERTIES, &AMENITIES, &BOOKINGS, &REVIEWS];

pub fn find(name: &str) -> Option<&'static ResourceSpec> {
    RESOURCES.iter().copied().find(|r| r.name == name)
}

/// Resources reachable through the shared CRUD routes.
pub fn generic() -> impl Iterator<Item = &'static ResourceSpec> {
    RESOURCES.iter().copied().filter(|r| r.generic_routes)
}
