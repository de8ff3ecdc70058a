pub(super) fn lookup(key: &str) -> Option<&'static str> {
    let text = match key {
        "dashboard.title" => "订阅面板",
        "expires" => "到期于",
        "expired" => "已过期",
        "online" => "在线",
        "notConnectedYet" => "尚未连接",
        "time.year" => "年",
        "time.years" => "年",
        "time.month" => "个月",
        "time.months" => "个月",
        "time.day" => "天",
        "time.days" => "天",
        "time.hour" => "小时",
        "time.hours" => "小时",
        "time.min" => "分钟",
        "time.mins" => "分钟",
        "time.second" => "秒",
        "time.seconds" => "秒",
        "time.ago" => "前",
        "userInfo.unlimited" => "无限制",
        "userInfo.available" => "可用",
        "userInfo.duration" => "时长",
        "userInfo.expiryDate" => "到期日期",
        "userInfo.used" => "已用",
        "userInfo.total" => "总量",
        "userInfo.remaining" => "剩余",
        "userInfo.lifetime" => "累计用量",
        "userInfo.lastOnline" => "最后在线",
        "status.active" => "活跃",
        "status.disabled" => "已禁用",
        "status.limited" => "已限制",
        "status.expired" => "已过期",
        "status.on_hold" => "暂停中",
        "config.title" => "连接链接",
        "config.subscriptionLink" => "订阅链接",
        "config.showMore" => "显示更多",
        "config.showLess" => "收起",
        "config.more" => "更多",
        "config.hidden" => "已隐藏",
        "qr.title" => "二维码",
        "qr.tooLong" => "链接过长，无法生成二维码",
        "apps.title" => "应用",
        "apps.currentOS" => "当前系统",
        "apps.recommended" => "推荐",
        "apps.import" => "导入",
        "apps.copyAll" => "全部复制",
        "apps.copyAllSuccess" => "已全部复制",
        "apps.platform.ios" => "iOS / macOS",
        "apps.platform.android" => "安卓",
        "apps.platform.windows" => "Windows",
        "apps.platform.linux" => "Linux",
        "apps.platform.other" => "其他",
        "usage.title" => "用量",
        "usage.totalUsage" => "总用量",
        "usage.noData" => "暂无用量数据",
        "common.loading" => "加载中...",
        "common.error" => "加载数据失败",
        "common.retry" => "按 'r' 重试",
        "clipboard.copied" => "已复制到剪贴板！",
        "clipboard.failed" => "复制失败",
        "clipboard.notSupported" => "不支持剪贴板",
        "refresh.refreshing" => "刷新中...",
        "refresh.disabled" => "账户已禁用",
        "refresh.done" => "数据已刷新",
        "help.quit" => "退出",
        "help.refresh" => "刷新",
        "help.copy" => "复制",
        "help.qr" => "二维码",
        "help.more" => "展开/收起",
        "help.range" => "时间范围",
        "help.language" => "语言",
        "help.theme" => "主题",
        "help.tab" => "切换面板",
        "help.close" => "关闭",
        _ => return None,
    };
    Some(text)
}
