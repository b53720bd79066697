pub mod about;
pub mod achievements;
pub mod admissions;
pub mod article;
pub mod format;
pub mod hero;
pub mod home;
pub mod news;
pub mod settings;

pub use about::AboutPage;
pub use achievements::{AchievementsPage, LevelFilter};
pub use admissions::AdmissionsPage;
pub use article::{ArticlePage, ArticleState};
pub use home::HomePage;
pub use news::NewsPage;
pub use settings::{flatten_settings, Settings};
