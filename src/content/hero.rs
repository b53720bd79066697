use crate::api::Hero;

/// 首页横幅轮播
///
/// 只有多于一个横幅时才会自动轮换；索引始终落在 `[0, len)` 内（列表为空时为 0）。
#[derive(Debug, Clone, Default)]
pub struct HeroCarousel {
    heroes: Vec<Hero>,
    index: usize,
}

impl HeroCarousel {
    /// 替换横幅列表，越界的索引重置为 0
    pub fn replace(&mut self, mut heroes: Vec<Hero>) {
        heroes.sort_by_key(|h| h.order);
        self.heroes = heroes;
        if self.index >= self.heroes.len() {
            self.index = 0;
        }
    }

    /// 定时器触发：前进一格并循环
    pub fn tick(&mut self) -> bool {
        if self.heroes.len() <= 1 {
            return false;
        }
        self.index = (self.index + 1) % self.heroes.len();
        true
    }

    /// 手动选择（对应页面上的圆点）
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.heroes.len() {
            self.index = index;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&Hero> {
        self.heroes.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    /// 圆点指示器，例如 `○ ● ○`；不足两个时为空
    pub fn dots(&self) -> String {
        if self.heroes.len() <= 1 {
            return String::new();
        }
        (0..self.heroes.len())
            .map(|i| if i == self.index { "●" } else { "○" })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MediaType;

    fn carousel(heroes: Vec<Hero>) -> HeroCarousel {
        let mut c = HeroCarousel::default();
        c.replace(heroes);
        c
    }

    fn hero(id: i64, order: i32) -> Hero {
        Hero {
            id,
            title: format!("Banner {}", id),
            subtitle: None,
            media_type: MediaType::Image,
            media_url: Some(format!("heroes/{}.jpg", id)),
            cta_text: None,
            cta_url: None,
            order,
        }
    }

    #[test]
    fn single_hero_never_rotates() {
        let mut c = carousel(vec![hero(1, 0)]);
        assert!(!c.tick());
        assert_eq!(c.index(), 0);
        assert_eq!(c.dots(), "");
    }

    #[test]
    fn rotation_wraps_around() {
        let mut c = carousel(vec![hero(1, 0), hero(2, 1), hero(3, 2)]);
        c.tick();
        c.tick();
        assert_eq!(c.current().map(|h| h.id), Some(3));
        c.tick();
        assert_eq!(c.current().map(|h| h.id), Some(1));
        assert_eq!(c.dots(), "● ○ ○");
    }

    #[test]
    fn heroes_follow_display_order() {
        let c = carousel(vec![hero(1, 5), hero(2, 1)]);
        assert_eq!(c.current().map(|h| h.id), Some(2));
    }

    #[test]
    fn shrinking_list_resets_index() {
        let mut c = carousel(vec![hero(1, 0), hero(2, 1), hero(3, 2)]);
        assert!(c.select(2));
        c.replace(vec![hero(4, 0)]);
        assert_eq!(c.index(), 0);
        assert!(!c.select(3));
    }

    #[test]
    fn empty_carousel_has_no_current() {
        let mut c = HeroCarousel::default();
        assert!(c.current().is_none());
        assert!(!c.tick());
    }
}
