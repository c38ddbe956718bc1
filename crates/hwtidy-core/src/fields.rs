//! Field typing policy tables.
//!
//! Every coercion and expectation decision the walkers make is driven by
//! the tables in this module, so the policy can be reviewed and tested
//! independently of the tree-walking mechanics. The field sets were
//! derived from corpus analysis of real collector output.

use crate::tag::Category;

/// Fields that should always carry numeric values.
pub const NUMERIC_FIELDS: &[&str] = &[
    "latency",
    "cores",
    "enabledcores",
    "microcode",
    "threads",
    "level",
    "ansiversion",
    "size",
    "capacity",
    "width",
    "clock",
    "units",
    "depth",
    "FATs",
    "logicalsectorsize",
    "sectorsize",
];

/// Fields that should always carry boolean values.
pub const BOOLEAN_FIELDS: &[&str] = &[
    "claimed",
    "disabled",
    "boot",
    "broadcast",
    "link",
    "multicast",
    "slave",
    "removable",
    "audio",
    "dvd",
];

/// Capability names that represent boolean feature flags. Capabilities
/// outside this list keep their descriptive values untouched.
pub const CAPABILITY_BOOLEANS: &[&str] = &[
    "pci",
    "pciexpress",
    "pm",
    "msi",
    "msix",
    "bus_master",
    "cap_list",
    "rom",
    "fb",
    "pnp",
    "upgrade",
    "shadowing",
    "cdboot",
    "bootselect",
    "edd",
    "usb",
    "netboot",
    "acpi",
    "biosbootspecification",
    "uefi",
    "escd",
    "virtualmachine",
    "smp",
    "vsyscall32",
    "gpt-1_00",
    "partitioned",
    "partitioned:gpt",
    "nofs",
    "fat",
    "initialized",
    "journaled",
    "extended_attributes",
    "large_files",
    "huge_files",
    "dir_nlink",
    "recover",
    "extents",
    "ethernet",
    "physical",
    // Media capabilities
    "removable",
    "audio",
    "dvd",
];

/// Substrings in a lowercased capability description that flip it to
/// "absent". Anything else reads as an affirmative statement.
pub const NEGATIVE_MARKERS: &[&str] =
    &[" no ", "not ", "none", "disabled", "unsupported", "unavailable"];

/// Acceptable structural categories per known field, for validation.
/// Null is always acceptable on top of these (optional-field convention).
pub const EXPECTED_TYPES: &[(&str, &[Category])] = &[
    // Numeric fields
    ("latency", &[Category::Integer, Category::Float]),
    ("cores", &[Category::Integer]),
    ("enabledcores", &[Category::Integer]),
    // Can be int or string like "218104848"
    ("microcode", &[Category::Integer, Category::String]),
    ("threads", &[Category::Integer]),
    ("level", &[Category::Integer]),
    ("ansiversion", &[Category::Integer, Category::String]),
    ("size", &[Category::Integer, Category::Float]),
    ("capacity", &[Category::Integer, Category::Float]),
    ("width", &[Category::Integer]),
    ("clock", &[Category::Integer, Category::Float]),
    ("depth", &[Category::Integer]),
    ("FATs", &[Category::Integer]),
    ("logicalsectorsize", &[Category::Integer]),
    ("sectorsize", &[Category::Integer]),
    // Boolean fields
    ("claimed", &[Category::Boolean]),
    ("disabled", &[Category::Boolean]),
    ("broadcast", &[Category::Boolean]),
    ("link", &[Category::Boolean]),
    ("multicast", &[Category::Boolean]),
    ("slave", &[Category::Boolean]),
    ("removable", &[Category::Boolean]),
    ("audio", &[Category::Boolean]),
    ("dvd", &[Category::Boolean]),
    // String fields (but can be numeric strings)
    ("physid", &[Category::String]),
    ("version", &[Category::String]),
    // Array fields
    ("logicalname", &[Category::Array, Category::String]),
    ("children", &[Category::Array]),
];

/// Boolean-named fields whose string-literal values warrant a
/// should-convert warning.
pub const BOOLEAN_WARNING_FIELDS: &[&str] =
    &["broadcast", "link", "multicast", "slave", "claimed", "disabled"];

/// Numeric-named fields whose parseable string values warrant a
/// should-convert warning.
pub const NUMERIC_WARNING_FIELDS: &[&str] = &[
    "latency",
    "cores",
    "enabledcores",
    "threads",
    "level",
    "size",
    "capacity",
    "width",
    "clock",
    "depth",
];

/// Whether a field name is in the numeric coercion set.
#[must_use]
pub fn is_numeric_field(name: &str) -> bool {
    NUMERIC_FIELDS.contains(&name)
}

/// Whether a field name is in the boolean coercion set.
#[must_use]
pub fn is_boolean_field(name: &str) -> bool {
    BOOLEAN_FIELDS.contains(&name)
}

/// Whether a capability name is a boolean feature flag.
#[must_use]
pub fn is_boolean_capability(name: &str) -> bool {
    CAPABILITY_BOOLEANS.contains(&name)
}

/// Acceptable categories for a known field, if any.
#[must_use]
pub fn expected_categories(name: &str) -> Option<&'static [Category]> {
    EXPECTED_TYPES
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, categories)| *categories)
}
