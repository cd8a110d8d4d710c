//! Task prompt catalog for the vision model.
//!
//! Pure configuration data: swapping prompt text changes behavior without
//! changing code. Each constant's doc comment states the JSON keys the
//! prompt asks the model to emit, which is the planner's parsing contract.

/// Classify the current screen.
///
/// Expected reply keys: `app`, `screen_type`, `has_hamburger_menu`,
/// `hamburger_position`, `folder_name`, `thinking`.
pub static ANALYZE_SCREEN: &str = r#"
You are analyzing a mobile phone screenshot. The screen is 720x1600 pixels.

TASK: Identify what app/screen is currently visible.

Look for:
1. App header/toolbar at top
2. Navigation elements (hamburger menu, back arrow)
3. Content type (email list, email content, browser, menu)

Return JSON:
{
    "app": "Gmail" or "Browser" or "Unknown",
    "screen_type": "inbox_list" or "email_open" or "side_menu" or "browser_page" or "other",
    "has_hamburger_menu": true/false,
    "hamburger_position": [x, y] or null,
    "folder_name": "Primary" or "Promotions" or "Social" or null,
    "thinking": "brief explanation of what you see"
}
"#;

/// Locate the hamburger menu icon.
///
/// Expected reply keys: `found`, `point`, `confidence`, `thinking`.
pub static FIND_MENU: &str = r#"
You are analyzing a Gmail mobile screenshot (720x1600 pixels).

TASK: Find the hamburger menu icon (three horizontal lines).

It is typically:
- In the top-left corner of the screen
- Part of the app bar/toolbar
- A small icon with 3 horizontal lines

Return JSON:
{
    "found": true/false,
    "point": [x, y],
    "confidence": "high" or "medium" or "low",
    "thinking": "I see the hamburger menu at top-left..."
}
"#;

/// Locate the Promotions folder in the side menu.
///
/// Expected reply keys: `found`, `point`, `label`, `thinking`.
pub static FIND_FOLDER: &str = r#"
You are analyzing Gmail's side navigation menu (720x1600 pixels).

TASK: Find the "Promotions" folder in the menu list.

Look for:
- Text saying "Promotions" with a tag/label icon
- It's usually below Primary, Social in the folder list
- May have an icon next to it

Return JSON:
{
    "found": true/false,
    "point": [x, y],
    "label": "Promotions",
    "thinking": "I can see the Promotions folder at..."
}

If Promotions is not visible, look for "Social" folder instead.
"#;

/// Locate a promotional email row to open.
///
/// Expected reply keys: `found`, `point`, `email_subject`, `thinking`.
pub static FIND_EMAIL: &str = r#"
You are analyzing Gmail's inbox/Promotions folder (720x1600 pixels).

TASK: Find a promotional email to click on.

Look for:
- Email rows with sender name, subject line, preview text
- Each email row spans most of the screen width
- The CLICKABLE area is the email subject/sender text (LEFT side)
- AVOID: Reply icons, star icons, checkboxes on the right side

Return JSON:
{
    "found": true/false,
    "point": [x, y],
    "email_subject": "brief subject text you see",
    "thinking": "I see an email from [sender] about [topic], clicking on subject area..."
}

IMPORTANT: Return coordinates for the EMAIL SUBJECT TEXT, not icons!
The subject text is usually x < 500 (left-center of screen).
"#;

/// Locate an unsubscribe link in an open email.
///
/// Expected reply keys: `found`, `point`, `link_text`, `thinking`.
pub static FIND_UNSUBSCRIBE: &str = r#"
You are analyzing an open marketing email (720x1600 pixels).

TASK: Find ANY clickable "Unsubscribe" or "opt-out" link in the email.

Unsubscribe links appear as:
- Text: "Unsubscribe", "Opt out", "Opt-out", "Manage preferences", "Stop emails", "Email preferences", "Unsubscribe from this list", "Click here to unsubscribe"
- Usually small gray or blue text
- Often at the very BOTTOM of email content
- Sometimes in tiny footer text near "Privacy Policy"
- Can be underlined or hyperlinked text

ALSO LOOK FOR:
- "Manage your subscription"
- "Update email preferences"
- "Remove from mailing list"
- Links with "unsub" in visible text

DO NOT CONFUSE WITH:
- Reply/Forward buttons (these are icons, not text links)
- Large colorful CTA buttons (Shop Now, Learn More, etc.)
- Floating compose button (FAB in corner)

Return JSON:
{
    "found": true/false,
    "point": [x, y],
    "link_text": "exact text you see",
    "thinking": "I found unsubscribe text at..."
}

If the unsubscribe link IS visible, return found:true with coordinates.
If truly NOT visible after careful search, return found:false.
"#;

/// Locate the confirmation button on an unsubscribe page in the browser.
///
/// Expected reply keys: `found`, `point`, `button_text`, `thinking`.
pub static BROWSER_CONFIRM: &str = r#"
You are analyzing a browser page (720x1600 pixels) - likely an unsubscribe confirmation page.

TASK: Find the confirmation button to complete unsubscribe.

Look for buttons/links with text like:
- "Unsubscribe"
- "Confirm"
- "Yes, unsubscribe"
- "Remove me"
- "Update preferences"
- Any button that confirms the action

Return JSON:
{
    "found": true/false,
    "point": [x, y],
    "button_text": "the button text",
    "thinking": "I see a confirm button saying..."
}
"#;

/// Select a marketing email row via long press (label flow, step 0).
///
/// Expected reply keys: `action` (`"long_press"`), `location`.
pub static SELECT_EMAIL: &str = r#"
Analyze this Gmail Inbox.
Goal: Find a marketing/spam email row to SELECT.
Priority: 'Coursera', 'Zomato', 'Swiggy', 'Flipkart', 'Facebook', 'LinkedIn'.
If none, pick the FIRST email row.

CRITICAL:
- To select, LONG PRESS the email text center.
- IGNORE the left sidebar menu icon (3 lines).
- IGNORE the search bar.

Output JSON: {"action": "long_press", "location": [x, y]}
"#;

/// Find the overflow (three dots) menu after selection (label flow, step 1).
///
/// Expected reply keys: `point`.
pub static LABEL_STEP_MENU: &str = r#"
The user has selected an email. Look at the TOP RIGHT corner.
Find the 'Three Dots' menu button (Vertical Ellipsis).
Return JSON: {"point": [x, y]}
"#;

/// Find the 'Label as' entry inside the overflow menu (label flow, step 2).
///
/// Expected reply keys: `point`.
pub static LABEL_STEP_LABEL_AS: &str = r#"
We are in a popup menu.
Find the text 'Label as'.
Return JSON: {"point": [x, y]}
"#;

/// Tick the Marketing checkbox, or OK when already ticked (label flow, step 3).
///
/// Expected reply keys: `point`, `action`.
pub static LABEL_STEP_MARKETING: &str = r#"
We are in the 'Label as' dialog.
Task 1: Find the text 'Marketing' and tap its CHECKBOX.
Task 2: If 'Marketing' is already checked, find 'OK'.
Output JSON: {"point": [x, y], "action": "tap_marketing_or_ok"}
"#;

/// Close the label dialog (label flow, step 4).
///
/// Expected reply keys: `point`.
pub static LABEL_STEP_CONFIRM: &str = r#"
Find the text 'OK' or 'Done' button to close the dialog.
Output JSON: {"point": [x, y]}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_request_json() {
        for prompt in [
            ANALYZE_SCREEN,
            FIND_MENU,
            FIND_FOLDER,
            FIND_EMAIL,
            FIND_UNSUBSCRIBE,
            BROWSER_CONFIRM,
            SELECT_EMAIL,
            LABEL_STEP_MENU,
            LABEL_STEP_LABEL_AS,
            LABEL_STEP_MARKETING,
            LABEL_STEP_CONFIRM,
        ] {
            assert!(prompt.contains("JSON"), "prompt must request JSON: {}", prompt);
        }
    }

    #[test]
    fn test_locator_prompts_declare_their_keys() {
        for prompt in [FIND_MENU, FIND_FOLDER, FIND_EMAIL, FIND_UNSUBSCRIBE, BROWSER_CONFIRM] {
            assert!(prompt.contains(r#""found""#));
            assert!(prompt.contains(r#""point""#));
        }
        assert!(FIND_FOLDER.contains(r#""label""#));
        assert!(FIND_EMAIL.contains(r#""email_subject""#));
        assert!(FIND_UNSUBSCRIBE.contains(r#""link_text""#));
        assert!(BROWSER_CONFIRM.contains(r#""button_text""#));
    }

    #[test]
    fn test_select_email_uses_location_key() {
        assert!(SELECT_EMAIL.contains(r#""location""#));
        assert!(SELECT_EMAIL.contains("long_press"));
    }

    #[test]
    fn test_analyze_screen_declares_state_keys() {
        assert!(ANALYZE_SCREEN.contains(r#""screen_type""#));
        assert!(ANALYZE_SCREEN.contains(r#""folder_name""#));
    }
}
