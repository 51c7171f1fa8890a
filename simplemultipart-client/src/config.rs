//! The configuration of the client adapter, given from environment variables and lazy
//! initialized when needed.

use once_cell::race::OnceBool;
use std::env;


/// Return true if container models request ambient occlusion, this is the default.
///
/// To disable it, set `MULTIPART_AMBIENT_OCCLUSION=0`.
pub fn ambient_occlusion() -> bool {
    static ENV: OnceBool = OnceBool::new();
    ENV.get_or_init(|| {
        env::var_os("MULTIPART_AMBIENT_OCCLUSION")
            .map(|s| s.as_encoded_bytes() != b"0")
            .unwrap_or(true)
    })
}

/// Return true if a part without model should be reported as an error instead of a
/// warning.
///
/// To enable this, set `MULTIPART_STRICT_MODELS=1`.
pub fn strict_models() -> bool {
    static ENV: OnceBool = OnceBool::new();
    ENV.get_or_init(|| {
        env::var_os("MULTIPART_STRICT_MODELS")
            .map(|s| s.as_encoded_bytes() == b"1")
            .unwrap_or(false)
    })
}
