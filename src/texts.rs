//! Russian UI strings.

pub const APP_TITLE: &str = "Семейный помощник";
pub const GUEST: &str = "Гость";

pub mod tabs {
    pub const SHOPPING: &str = "Покупки";
    pub const CALENDAR: &str = "Календарь";
    pub const BUDGET: &str = "Бюджет";
}

pub mod shopping {
    pub const ADD_ENTRY: &str = "+ добавить";
    pub const ADD_DIALOG_TITLE: &str = "Новая покупка";
    pub const RENAME_DIALOG_TITLE: &str = "Переименовать";
    pub const TITLE_PLACEHOLDER: &str = "Название...";
    pub const ADD_SUBMIT: &str = "Добавить";
    pub const RENAME_SUBMIT: &str = "Сохранить";
    pub const CANCEL: &str = "Отмена";
    pub const EMPTY_LIST: &str = "список пуст";
    pub const MENU_RENAME: &str = "Переименовать";
    pub const MENU_DELETE: &str = "Удалить";
    pub const PREV_LIST: &str = "Предыдущий список";
    pub const NEXT_LIST: &str = "Следующий список";

    pub fn goto_list(number: usize) -> String {
        format!("Перейти к списку {number}")
    }
}

pub mod calendar {
    pub const TITLE: &str = "Ближайшие события";
    pub const EMPTY: &str = "Нет событий";
}

pub mod budget {
    pub const TITLE: &str = "Бюджет";
    pub const PLACEHOLDER: &str = "Раздел в разработке";
}
