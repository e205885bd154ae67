// Stable error type identifiers exposed in API error bodies.

pub mod validation {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const VALIDATION_ERROR: &str = "validation_error";
}

pub mod lookup {
    pub const NOT_FOUND: &str = "not_found";
}

pub mod storage {
    pub const STORAGE_ERROR: &str = "storage_error";
}

pub mod upstream {
    pub const VENDOR_ERROR: &str = "vendor_error";
    pub const VENDOR_UNAVAILABLE: &str = "vendor_unavailable";
}
