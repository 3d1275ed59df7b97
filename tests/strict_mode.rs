//! Strict mode turns diagnostics into panics.
//!
//! Lives in its own test binary: strict mode is process-wide.

use framezone::diagnostics::strict_mode;
use framezone::{ManualClock, Profiler, ProfilerConfig, StrictMode, StrictModeGuard};
use std::panic::{self, AssertUnwindSafe};

#[test]
fn test_open_zone_at_frame_boundary_panics_in_strict_mode() {
    let profiler = Profiler::with_clock(ProfilerConfig::minimal(), ManualClock::new());
    let zone = profiler.register("Leaky");
    let ctx = profiler.context();
    ctx.begin_frame();

    {
        let _strict = StrictModeGuard::new(StrictMode::PanicOnWarning);
        assert_eq!(strict_mode(), StrictMode::PanicOnWarning);

        let open = ctx.zone(zone);
        let result = panic::catch_unwind(AssertUnwindSafe(|| ctx.begin_frame()));
        let payload = result.expect_err("ZP202 should be fatal in strict mode");
        let message = payload
            .downcast_ref::<String>()
            .map(String::as_str)
            .unwrap_or_default();
        assert!(message.contains("ZP202"), "unexpected panic: {message}");

        // The depth was reset before the diagnostic fired.
        assert_eq!(ctx.depth(), 0);
        drop(open);
        assert_eq!(ctx.depth(), 0);
    }

    assert_eq!(strict_mode(), StrictMode::Warn);

    // Back in warn mode the same misuse only reports.
    let _open = ctx.zone(zone);
    ctx.begin_frame();
    assert_eq!(ctx.depth(), 0);
}
