pub(super) fn lookup(key: &str) -> Option<&'static str> {
    let text = match key {
        "dashboard.title" => "Subscription Dashboard",
        "expires" => "Expires in",
        "expired" => "Expired",
        "online" => "Online",
        "notConnectedYet" => "Not connected yet",
        "time.year" => "year",
        "time.years" => "years",
        "time.month" => "month",
        "time.months" => "months",
        "time.day" => "day",
        "time.days" => "days",
        "time.hour" => "hour",
        "time.hours" => "hours",
        "time.min" => "min",
        "time.mins" => "mins",
        "time.second" => "second",
        "time.seconds" => "seconds",
        "time.ago" => "ago",
        "userInfo.unlimited" => "Unlimited",
        "userInfo.available" => "Available",
        "userInfo.duration" => "Duration",
        "userInfo.expiryDate" => "Expiry date",
        "userInfo.used" => "Used",
        "userInfo.total" => "Total",
        "userInfo.remaining" => "Remaining",
        "userInfo.lifetime" => "Lifetime usage",
        "userInfo.lastOnline" => "Last online",
        "status.active" => "Active",
        "status.disabled" => "Disabled",
        "status.limited" => "Limited",
        "status.expired" => "Expired",
        "status.on_hold" => "On hold",
        "config.title" => "Connection links",
        "config.subscriptionLink" => "Subscription link",
        "config.showMore" => "Show more",
        "config.showLess" => "Show less",
        "config.more" => "more",
        "config.hidden" => "hidden",
        "qr.title" => "QR code",
        "qr.tooLong" => "Link is too long for a QR code",
        "apps.title" => "Apps",
        "apps.currentOS" => "Your OS",
        "apps.recommended" => "Recommended",
        "apps.import" => "Import",
        "apps.copyAll" => "Copy all",
        "apps.copyAllSuccess" => "All copied",
        "apps.platform.ios" => "iOS / macOS",
        "apps.platform.android" => "Android",
        "apps.platform.windows" => "Windows",
        "apps.platform.linux" => "Linux",
        "apps.platform.other" => "Other",
        "usage.title" => "Usage",
        "usage.totalUsage" => "Total usage",
        "usage.noData" => "No usage data",
        "common.loading" => "Loading...",
        "common.error" => "Failed to load data",
        "common.retry" => "Press 'r' to retry",
        "clipboard.copied" => "Copied to clipboard!",
        "clipboard.failed" => "Failed to copy",
        "clipboard.notSupported" => "Clipboard not supported",
        "refresh.refreshing" => "Refreshing...",
        "refresh.disabled" => "Account disabled",
        "refresh.done" => "Data refreshed",
        "help.quit" => "Quit",
        "help.refresh" => "Refresh",
        "help.copy" => "Copy",
        "help.qr" => "QR",
        "help.more" => "More/Less",
        "help.range" => "Time range",
        "help.language" => "Language",
        "help.theme" => "Theme",
        "help.tab" => "Switch panel",
        "help.close" => "Close",
        _ => return None,
    };
    Some(text)
}
