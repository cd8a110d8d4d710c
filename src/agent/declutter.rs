//! The declutter agent: sub-tasks and workflows.
//!
//! Every sub-task follows the same bounded-retry pattern: capture a
//! screenshot (pause and retry if it fails), query the vision backend with
//! the sub-task's prompt, act on a hit, issue a corrective action on a
//! miss. No state survives an iteration; everything is re-derived from the
//! next screenshot.

use std::time::Duration;

use tokio::time::sleep;

use crate::adb::DeviceControl;
use crate::agent::retry::{Corrective, RetryPolicy};
use crate::agent::screen::ScreenState;
use crate::config::{fallback_point, prompts};
use crate::model::{Point, VisionQuery};

/// Gmail package id.
pub const GMAIL_PACKAGE: &str = "com.google.android.gm";

/// Back presses issued to return to the inbox. Over-pressing is tolerated
/// by Gmail; arrival is not verified.
pub const RETURN_BACK_PRESSES: u32 = 4;

const LAUNCH_SETTLE: Duration = Duration::from_secs(4);
const MENU_SETTLE: Duration = Duration::from_millis(1500);
const FOLDER_SETTLE: Duration = Duration::from_secs(2);
const EMAIL_OPEN_SETTLE: Duration = Duration::from_millis(2500);
const UNSUBSCRIBE_SETTLE: Duration = Duration::from_secs(3);
const BROWSER_LOAD: Duration = Duration::from_secs(2);
const BACK_PAUSE: Duration = Duration::from_millis(600);
const LONG_PRESS_MS: u64 = 1000;

/// Which cleanup workflow to run. The two are alternate strategies, not
/// stages of one flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupStrategy {
    /// Open each email, follow its unsubscribe link, confirm in the browser.
    Unsubscribe,
    /// Long-press select each email and label it Marketing via the
    /// contextual menu.
    LabelMarketing,
}

impl CleanupStrategy {
    /// Parse a strategy name; anything unrecognized falls back to
    /// [`CleanupStrategy::Unsubscribe`].
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "label" | "label-marketing" | "label_marketing" => Self::LabelMarketing,
            _ => Self::Unsubscribe,
        }
    }
}

/// Count of processed items for one invocation. Logged at the end of a run
/// and then discarded; nothing persists across runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: u32,
    pub processed: u32,
}

/// What counts as a hit for a sub-task's reply.
#[derive(Debug, Clone, Copy)]
enum HitRule {
    /// The reply must say `found: true` and carry an in-bounds point.
    Found,
    /// An in-bounds point alone is enough (prompts that omit `found`).
    HasPoint,
}

/// One named perceive-then-act unit with its retry budget.
struct SubTask {
    name: &'static str,
    prompt: &'static str,
    hit: HitRule,
    retry: RetryPolicy,
    corrective: Corrective,
}

/// Scroll gesture for the side menu folder list.
const MENU_SCROLL: Corrective = Corrective::Swipe {
    x1: 360,
    y1: 800,
    x2: 360,
    y2: 400,
    duration_ms: 300,
    settle: Duration::from_secs(1),
};

/// Scroll gesture for the inbox email list.
const INBOX_SCROLL: Corrective = Corrective::Swipe {
    x1: 360,
    y1: 800,
    x2: 360,
    y2: 500,
    duration_ms: 300,
    settle: Duration::from_secs(1),
};

/// Scroll gesture for digging further into an open email body.
const EMAIL_BODY_SCROLL: Corrective = Corrective::Swipe {
    x1: 360,
    y1: 1200,
    x2: 360,
    y2: 600,
    duration_ms: 200,
    settle: Duration::from_secs(1),
};

/// AI-vision janitor driving Gmail on a single attached device.
pub struct DeclutterAgent<D, V> {
    device: D,
    vision: V,
}

impl<D: DeviceControl, V: VisionQuery> DeclutterAgent<D, V> {
    pub fn new(device: D, vision: V) -> Self {
        Self { device, vision }
    }

    /// Run one cleanup batch with the chosen strategy.
    pub async fn run(&self, strategy: CleanupStrategy, num_emails: u32) -> RunSummary {
        tracing::info!("🚀 Launching Gmail...");
        self.device.launch_app(GMAIL_PACKAGE).await;
        sleep(LAUNCH_SETTLE).await;

        let summary = match strategy {
            CleanupStrategy::Unsubscribe => self.clean_promotions(num_emails).await,
            CleanupStrategy::LabelMarketing => self.label_batch(num_emails).await,
        };

        tracing::info!(
            "🏁 Cleaned {}/{} emails",
            summary.processed,
            summary.attempted
        );
        summary
    }

    // --- bounded-retry engine ---

    /// Drive one sub-task to a located point, or failure after the retry
    /// ceiling. The target tap is never issued on exhaustion; corrective
    /// actions are issued after every miss.
    async fn locate(&self, task: &SubTask) -> Option<Point> {
        for attempt in 1..=task.retry.max_attempts {
            let Some(shot) = self.device.capture().await else {
                tracing::warn!("No screenshot for '{}', pausing...", task.name);
                sleep(task.retry.capture_pause).await;
                continue;
            };

            let reply = self.vision.analyze(&shot, task.prompt).await;
            if let Some(reply) = &reply {
                let hit = match task.hit {
                    HitRule::Found => reply.found,
                    HitRule::HasPoint => true,
                };
                if hit {
                    if let Some(pt) = reply.target_point(shot.width(), shot.height()) {
                        tracing::info!("✅ '{}' hit at ({}, {})", task.name, pt.x, pt.y);
                        return Some(pt);
                    }
                }
            }

            tracing::info!(
                "🔄 Attempt {}/{}: '{}' not found, retrying...",
                attempt,
                task.retry.max_attempts,
                task.name
            );
            self.apply_corrective(&task.corrective).await;
        }

        tracing::warn!(
            "❌ '{}' failed after {} attempts",
            task.name,
            task.retry.max_attempts
        );
        None
    }

    async fn apply_corrective(&self, corrective: &Corrective) {
        match *corrective {
            Corrective::None => {}
            Corrective::Wait(duration) => sleep(duration).await,
            Corrective::Swipe {
                x1,
                y1,
                x2,
                y2,
                duration_ms,
                settle,
            } => {
                self.device.swipe(x1, y1, x2, y2, duration_ms).await;
                sleep(settle).await;
            }
        }
    }

    // --- sub-tasks: unsubscribe flow ---

    /// Find and tap the hamburger menu.
    pub async fn open_menu(&self) -> bool {
        tracing::info!("📂 Finding hamburger menu...");
        let task = SubTask {
            name: "open menu",
            prompt: prompts::FIND_MENU,
            hit: HitRule::Found,
            retry: RetryPolicy::default(),
            corrective: Corrective::Wait(Duration::from_secs(1)),
        };

        match self.locate(&task).await {
            Some(pt) => {
                self.device.tap(pt.x as i32, pt.y as i32).await;
                sleep(MENU_SETTLE).await;
                true
            }
            None => false,
        }
    }

    /// Find and tap the Promotions folder in an already-open side menu,
    /// scrolling the menu between attempts.
    pub async fn find_folder_in_menu(&self) -> bool {
        let task = SubTask {
            name: "find folder",
            prompt: prompts::FIND_FOLDER,
            hit: HitRule::Found,
            retry: RetryPolicy::default(),
            corrective: MENU_SCROLL,
        };

        match self.locate(&task).await {
            Some(pt) => {
                self.device.tap(pt.x as i32, pt.y as i32).await;
                sleep(FOLDER_SETTLE).await;
                true
            }
            None => false,
        }
    }

    /// Open the side menu and navigate to the Promotions folder.
    pub async fn navigate_to_promotions(&self) -> bool {
        tracing::info!("📂 Navigating to Promotions...");

        if !self.open_menu().await {
            return false;
        }
        sleep(Duration::from_secs(1)).await;

        self.find_folder_in_menu().await
    }

    /// Find an email row and open it, scrolling the inbox between attempts.
    ///
    /// A hit in the icon zone (x too far right, overlapping reply/star
    /// icons) is redirected to a safe left-hand x before tapping.
    pub async fn find_and_open_email(&self) -> bool {
        tracing::info!("👀 Looking for email to open...");
        let task = SubTask {
            name: "find email",
            prompt: prompts::FIND_EMAIL,
            hit: HitRule::Found,
            retry: RetryPolicy::default(),
            corrective: INBOX_SCROLL,
        };

        match self.locate(&task).await {
            Some(pt) => {
                let tap_pt = pt.clamp_icon_zone();
                if tap_pt != pt {
                    tracing::warn!("⚠️ Point too far right (icon zone), adjusting...");
                }
                self.device.tap(tap_pt.x as i32, tap_pt.y as i32).await;
                sleep(EMAIL_OPEN_SETTLE).await;
                true
            }
            None => false,
        }
    }

    /// Fast multi-swipe routine to reach the email footer where
    /// unsubscribe links live.
    pub async fn scroll_to_footer(&self) {
        tracing::info!("📉 Scrolling to email footer...");
        for _ in 0..10 {
            self.device.swipe(360, 1300, 360, 400, 100).await;
            sleep(Duration::from_millis(150)).await;
        }
        sleep(Duration::from_millis(500)).await;
    }

    /// Find and tap an unsubscribe link in the open email.
    pub async fn find_unsubscribe(&self) -> bool {
        tracing::info!("🔗 Looking for Unsubscribe link...");
        self.scroll_to_footer().await;

        let task = SubTask {
            name: "find unsubscribe",
            prompt: prompts::FIND_UNSUBSCRIBE,
            hit: HitRule::Found,
            retry: RetryPolicy::default(),
            corrective: EMAIL_BODY_SCROLL,
        };

        match self.locate(&task).await {
            Some(pt) => {
                self.device.tap(pt.x as i32, pt.y as i32).await;
                sleep(UNSUBSCRIBE_SETTLE).await;
                true
            }
            None => false,
        }
    }

    /// Handle the browser confirmation page.
    ///
    /// "Not found" means the unsubscribe was auto-confirmed, so it counts
    /// as success; only a failed screenshot reports failure.
    pub async fn confirm_in_browser(&self) -> bool {
        tracing::info!("🌐 Checking for browser confirmation...");
        sleep(BROWSER_LOAD).await;

        let Some(shot) = self.device.capture().await else {
            return false;
        };

        let reply = self.vision.analyze(&shot, prompts::BROWSER_CONFIRM).await;
        if let Some(reply) = reply {
            if reply.found {
                if let Some(pt) = reply.target_point(shot.width(), shot.height()) {
                    tracing::info!(
                        "✅ Found confirm button '{}' at ({}, {})",
                        reply.button_text.as_deref().unwrap_or("Confirm"),
                        pt.x,
                        pt.y
                    );
                    self.device.tap(pt.x as i32, pt.y as i32).await;
                    sleep(Duration::from_secs(2)).await;
                    return true;
                }
            }
        }

        tracing::info!("ℹ️ No confirmation button found (may be auto-confirmed)");
        true
    }

    /// Return to the inbox with a fixed number of back presses. No arrival
    /// check; the exact count is issued regardless of depth.
    pub async fn return_to_inbox(&self) {
        tracing::info!("🔙 Returning to inbox...");
        for _ in 0..RETURN_BACK_PRESSES {
            self.device.press_back().await;
            sleep(BACK_PAUSE).await;
        }
        sleep(Duration::from_secs(1)).await;
    }

    /// Process one email: open, unsubscribe, confirm, return.
    pub async fn process_email(&self, email_num: u32) -> bool {
        tracing::info!("📧 Processing email #{}", email_num);

        if !self.find_and_open_email().await {
            tracing::warn!("⚠️ Could not open email #{}, skipping...", email_num);
            return false;
        }

        if !self.find_unsubscribe().await {
            tracing::warn!("⚠️ No unsubscribe found in email #{}", email_num);
            self.return_to_inbox().await;
            return false;
        }

        self.confirm_in_browser().await;
        self.return_to_inbox().await;

        tracing::info!("✅ Email #{} processed!", email_num);
        true
    }

    /// Clean a batch of promotional emails via the unsubscribe flow.
    pub async fn clean_promotions(&self, num_emails: u32) -> RunSummary {
        tracing::info!("🧹 Cleaning Promotions ({} emails)", num_emails);

        let mut summary = RunSummary {
            attempted: num_emails,
            processed: 0,
        };

        if !self.navigate_to_promotions().await {
            tracing::error!("❌ Failed to navigate to Promotions");
            return summary;
        }

        for i in 0..num_emails {
            if self.process_email(i + 1).await {
                summary.processed += 1;
            }
            sleep(Duration::from_secs(1)).await;
        }

        summary
    }

    // --- sub-tasks: label-as-marketing flow ---

    /// Classify the current screen. Advisory; `Unknown` never aborts.
    pub async fn classify_screen(&self) -> ScreenState {
        let Some(shot) = self.device.capture().await else {
            return ScreenState::Unknown;
        };

        match self.vision.analyze(&shot, prompts::ANALYZE_SCREEN).await {
            Some(reply) => ScreenState::from_reply(&reply),
            None => ScreenState::Unknown,
        }
    }

    /// Long-press select a marketing email row.
    pub async fn select_email(&self) -> bool {
        tracing::info!("👆 Selecting email via long press...");
        let task = SubTask {
            name: "select email",
            prompt: prompts::SELECT_EMAIL,
            hit: HitRule::HasPoint,
            retry: RetryPolicy::default(),
            corrective: INBOX_SCROLL,
        };

        match self.locate(&task).await {
            Some(pt) => {
                self.device
                    .long_press(pt.x as i32, pt.y as i32, LONG_PRESS_MS)
                    .await;
                sleep(MENU_SETTLE).await;
                true
            }
            None => false,
        }
    }

    /// One step of the contextual label sequence: tap the vision hit, or
    /// the step's table fallback when the query yields nothing, so the
    /// flow always makes forward progress.
    async fn label_step(&self, step: &'static str, prompt: &'static str) -> bool {
        let seen = match self.device.capture().await {
            Some(shot) => self
                .vision
                .analyze(&shot, prompt)
                .await
                .and_then(|reply| reply.target_point(shot.width(), shot.height())),
            None => None,
        };

        let pt = match seen.or_else(|| fallback_point(step)) {
            Some(pt) => pt,
            None => {
                tracing::warn!("❌ No target and no fallback for step '{}'", step);
                return false;
            }
        };

        if seen.is_none() {
            tracing::info!("🧭 Step '{}': using fallback point ({}, {})", step, pt.x, pt.y);
        }

        self.device.tap(pt.x as i32, pt.y as i32).await;
        sleep(Duration::from_secs(1)).await;
        true
    }

    /// Label one email as Marketing: select, then the four-step contextual
    /// menu sequence (overflow menu, 'Label as', checkbox, OK).
    pub async fn label_email(&self, email_num: u32) -> bool {
        tracing::info!("🏷️ Labeling email #{}", email_num);

        let state = self.classify_screen().await;
        tracing::info!("Current screen: {}", state);

        if !self.select_email().await {
            tracing::warn!("⚠️ Could not select email #{}, skipping...", email_num);
            return false;
        }

        let steps: [(&'static str, &'static str); 4] = [
            ("overflow_menu", prompts::LABEL_STEP_MENU),
            ("label_as", prompts::LABEL_STEP_LABEL_AS),
            ("marketing_checkbox", prompts::LABEL_STEP_MARKETING),
            ("confirm_ok", prompts::LABEL_STEP_CONFIRM),
        ];

        for (step, prompt) in steps {
            if !self.label_step(step, prompt).await {
                return false;
            }
        }

        tracing::info!("✅ Email #{} labeled!", email_num);
        true
    }

    /// Label a batch of emails straight from the inbox.
    pub async fn label_batch(&self, num_emails: u32) -> RunSummary {
        tracing::info!("🏷️ Labeling batch ({} emails)", num_emails);

        let mut summary = RunSummary {
            attempted: num_emails,
            processed: 0,
        };

        for i in 0..num_emails {
            if self.label_email(i + 1).await {
                summary.processed += 1;
            }
            sleep(Duration::from_secs(1)).await;
        }

        summary
    }
}
