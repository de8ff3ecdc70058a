pub(super) fn lookup(key: &str) -> Option<&'static str> {
    let text = match key {
        "dashboard.title" => "داشبورد اشتراک",
        "expires" => "انقضا در",
        "expired" => "منقضی شده",
        "online" => "آنلاین",
        "notConnectedYet" => "هنوز متصل نشده",
        "time.year" => "سال",
        "time.years" => "سال",
        "time.month" => "ماه",
        "time.months" => "ماه",
        "time.day" => "روز",
        "time.days" => "روز",
        "time.hour" => "ساعت",
        "time.hours" => "ساعت",
        "time.min" => "دقیقه",
        "time.mins" => "دقیقه",
        "time.second" => "ثانیه",
        "time.seconds" => "ثانیه",
        "time.ago" => "پیش",
        "userInfo.unlimited" => "نامحدود",
        "userInfo.available" => "در دسترس",
        "userInfo.duration" => "مدت",
        "userInfo.expiryDate" => "تاریخ انقضا",
        "userInfo.used" => "مصرف شده",
        "userInfo.total" => "کل",
        "userInfo.remaining" => "باقی‌مانده",
        "userInfo.lifetime" => "مصرف کل",
        "userInfo.lastOnline" => "آخرین اتصال",
        "status.active" => "فعال",
        "status.disabled" => "غیرفعال",
        "status.limited" => "محدود شده",
        "status.expired" => "منقضی شده",
        "status.on_hold" => "در انتظار",
        "config.title" => "لینک‌های اتصال",
        "config.subscriptionLink" => "لینک اشتراک",
        "config.showMore" => "نمایش بیشتر",
        "config.showLess" => "نمایش کمتر",
        "config.more" => "بیشتر",
        "config.hidden" => "پنهان",
        "qr.title" => "کد QR",
        "qr.tooLong" => "لینک برای کد QR خیلی طولانی است",
        "apps.title" => "برنامه‌ها",
        "apps.currentOS" => "سیستم شما",
        "apps.recommended" => "پیشنهادی",
        "apps.import" => "وارد کردن",
        "apps.copyAll" => "کپی همه",
        "apps.copyAllSuccess" => "همه کپی شد",
        "apps.platform.ios" => "iOS / macOS",
        "apps.platform.android" => "اندروید",
        "apps.platform.windows" => "ویندوز",
        "apps.platform.linux" => "لینوکس",
        "apps.platform.other" => "سایر",
        "usage.title" => "مصرف",
        "usage.totalUsage" => "مصرف کل",
        "usage.noData" => "داده‌ای برای مصرف نیست",
        "common.loading" => "در حال بارگذاری...",
        "common.error" => "خطا در دریافت اطلاعات",
        "common.retry" => "برای تلاش دوباره 'r' را بزنید",
        "clipboard.copied" => "در کلیپ‌بورد کپی شد!",
        "clipboard.failed" => "کپی ناموفق بود",
        "clipboard.notSupported" => "کلیپ‌بورد پشتیبانی نمی‌شود",
        "refresh.refreshing" => "در حال بروزرسانی...",
        "refresh.disabled" => "حساب غیرفعال است",
        "refresh.done" => "اطلاعات بروز شد",
        "help.quit" => "خروج",
        "help.refresh" => "بروزرسانی",
        "help.copy" => "کپی",
        "help.qr" => "QR",
        "help.more" => "بیشتر/کمتر",
        "help.range" => "بازه زمانی",
        "help.language" => "زبان",
        "help.theme" => "پوسته",
        "help.tab" => "تغییر بخش",
        "help.close" => "بستن",
        _ => return None,
    };
    Some(text)
}
