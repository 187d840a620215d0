use jiff::{Timestamp, tz};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TimestampDisplayProps {
    pub timestamp: Timestamp,
}

/// Short relative time ("5m", "3h"), falling back to a local date after a
/// week. The full local time is in the tooltip.
#[function_component]
pub fn TimestampDisplay(props: &TimestampDisplayProps) -> Html {
    let zoned = props.timestamp.to_zoned(tz::TimeZone::system());
    let full = zoned.strftime("%a, %d %b %Y %H:%M:%S %Z").to_string();
    let short = relative_label(props.timestamp, Timestamp::now(), || {
        zoned.strftime("%b %d, %Y").to_string()
    });

    html! {
        <time title={full} class="text-sm text-neutral-500 dark:text-neutral-400">
            {short}
        </time>
    }
}

fn relative_label(
    then: Timestamp,
    now: Timestamp,
    date: impl FnOnce() -> String,
) -> String {
    let seconds = now.as_second() - then.as_second();
    match seconds {
        s if s < 60 => "now".to_string(),
        s if s < 60 * 60 => format!("{}m", s / 60),
        s if s < 24 * 60 * 60 => format!("{}h", s / (60 * 60)),
        s if s < 7 * 24 * 60 * 60 => format!("{}d", s / (24 * 60 * 60)),
        _ => date(),
    }
}
