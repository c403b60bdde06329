#![no_main]

use libfuzzer_sys::fuzz_target;
use modns_core::naming::{self, Route};
use modns_core::paths::{Pattern, join_segments, normalize};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // First line is the request, the rest are registry keys
        let mut lines = s.lines();
        let Some(request) = lines.next() else { return };

        // Routing must accept any name
        if let Route::Bucket { key, .. } = naming::route(request) {
            assert!(key.len() <= request.len());
        }

        let segments: Vec<&str> = request.split('.').collect();
        let pattern = Pattern::new(&join_segments(&segments), "json", "index");
        for key in lines {
            let _ = pattern.classify(&normalize(key));
        }
    }
});
