pub(super) fn lookup(key: &str) -> Option<&'static str> {
    let text = match key {
        "dashboard.title" => "Панель подписки",
        "expires" => "Истекает через",
        "expired" => "Истекла",
        "online" => "В сети",
        "notConnectedYet" => "Ещё не подключался",
        "time.year" => "год",
        "time.years" => "лет",
        "time.month" => "месяц",
        "time.months" => "месяцев",
        "time.day" => "день",
        "time.days" => "дней",
        "time.hour" => "час",
        "time.hours" => "часов",
        "time.min" => "мин",
        "time.mins" => "мин",
        "time.second" => "секунда",
        "time.seconds" => "секунд",
        "time.ago" => "назад",
        "userInfo.unlimited" => "Безлимит",
        "userInfo.available" => "Доступно",
        "userInfo.duration" => "Длительность",
        "userInfo.expiryDate" => "Дата окончания",
        "userInfo.used" => "Использовано",
        "userInfo.total" => "Всего",
        "userInfo.remaining" => "Осталось",
        "userInfo.lifetime" => "Всего за всё время",
        "userInfo.lastOnline" => "Последний вход",
        "status.active" => "Активна",
        "status.disabled" => "Отключена",
        "status.limited" => "Ограничена",
        "status.expired" => "Истекла",
        "status.on_hold" => "На паузе",
        "config.title" => "Ссылки подключения",
        "config.subscriptionLink" => "Ссылка подписки",
        "config.showMore" => "Показать больше",
        "config.showLess" => "Показать меньше",
        "config.more" => "ещё",
        "config.hidden" => "скрыто",
        "qr.title" => "QR-код",
        "qr.tooLong" => "Ссылка слишком длинная для QR-кода",
        "apps.title" => "Приложения",
        "apps.currentOS" => "Ваша ОС",
        "apps.recommended" => "Рекомендуется",
        "apps.import" => "Импорт",
        "apps.copyAll" => "Копировать все",
        "apps.copyAllSuccess" => "Всё скопировано",
        "apps.platform.ios" => "iOS / macOS",
        "apps.platform.android" => "Android",
        "apps.platform.windows" => "Windows",
        "apps.platform.linux" => "Linux",
        "apps.platform.other" => "Другое",
        "usage.title" => "Использование",
        "usage.totalUsage" => "Общий трафик",
        "usage.noData" => "Нет данных",
        "common.loading" => "Загрузка...",
        "common.error" => "Не удалось загрузить данные",
        "common.retry" => "Нажмите 'r' для повтора",
        "clipboard.copied" => "Скопировано!",
        "clipboard.failed" => "Не удалось скопировать",
        "clipboard.notSupported" => "Буфер обмена не поддерживается",
        "refresh.refreshing" => "Обновление...",
        "refresh.disabled" => "Аккаунт отключён",
        "refresh.done" => "Данные обновлены",
        "help.quit" => "Выход",
        "help.refresh" => "Обновить",
        "help.copy" => "Копировать",
        "help.qr" => "QR",
        "help.more" => "Больше/Меньше",
        "help.range" => "Период",
        "help.language" => "Язык",
        "help.theme" => "Тема",
        "help.tab" => "Сменить раздел",
        "help.close" => "Закрыть",
        _ => return None,
    };
    Some(text)
}
