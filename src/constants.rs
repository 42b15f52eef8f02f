/// Well-known strings from the registration forms and the upstream
/// membership registry, referenced across the importer.

/// Host of the upstream profile service; profile URLs on any other host are
/// ignored.
pub const PROFILE_HOST: &str = "indiaultimate.org";

/// Exact membership-type label that marks an annual ("full") membership.
pub const ANNUAL_MEMBERSHIP_LABEL: &str = "Full Member (INR 600/person)";

/// Exact cell value marking a respondent as vaccinated.
pub const VACCINATED_YES: &str = "Yes";

// Program membership window applied to every imported membership.
pub const MEMBERSHIP_START: (i32, u32, u32) = (2022, 4, 1);
pub const MEMBERSHIP_END: (i32, u32, u32) = (2023, 3, 31);

// Drive-map CSV headers.
pub const DRIVE_MAP_FILE_ID: &str = "File ID";
pub const DRIVE_MAP_FILE_PATH: &str = "File Path";
