use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};
use zeroize::Zeroize;

/// Bumped on every copy or clear so older timers leave newer contents alone.
pub static CLIPBOARD_COPY_ID: AtomicU64 = AtomicU64::new(0);

/// Put `text` on the clipboard and clear it after `timeout`, unless something
/// else was copied or cleared in between.
pub fn copy_with_timeout(text: &str, timeout: Duration) {
    let copy_id = CLIPBOARD_COPY_ID.fetch_add(1, Ordering::SeqCst) + 1;
    let mut text = text.to_string();

    let spawned = thread::Builder::new()
        .name("clipboard".into())
        .spawn(move || hold_then_clear(&mut text, timeout, copy_id));
    if let Err(e) = spawned {
        warn!(error = %e, "cannot start clipboard thread");
    }
}

fn hold_then_clear(text: &mut String, timeout: Duration, copy_id: u64) {
    // The clipboard handle stays alive for the whole timeout; on X11 the
    // contents disappear with it.
    let mut clipboard = match arboard::Clipboard::new() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "clipboard unavailable");
            text.zeroize();
            return;
        }
    };

    let copied = clipboard.set_text(text.as_str());
    text.zeroize();
    if let Err(e) = copied {
        warn!(error = %e, "copy to clipboard failed");
        return;
    }

    thread::sleep(timeout);

    if CLIPBOARD_COPY_ID.load(Ordering::SeqCst) == copy_id {
        match clipboard.clear() {
            Ok(()) => debug!("clipboard cleared after timeout"),
            Err(e) => warn!(error = %e, "clipboard clear failed"),
        }
    }
}

/// Clear the clipboard right away and cancel any pending timed clear.
pub fn clear_now() -> bool {
    CLIPBOARD_COPY_ID.fetch_add(1, Ordering::SeqCst);
    match arboard::Clipboard::new().and_then(|mut c| c.clear()) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "clipboard clear failed");
            false
        }
    }
}
