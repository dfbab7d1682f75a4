//! Derived feed view over an already-fetched article list.
//!
//! Pure computation: filtering (title search + author selection) and fixed
//! page-size pagination. Holds no server-side state and performs no I/O;
//! the listing endpoint builds one per request, and a client can drive the
//! same type interactively.

use uuid::Uuid;

use crate::domain::Article;

/// Default number of articles per feed page.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// A filtered, paginated view over a list of articles.
///
/// Filter rules: case-insensitive substring match on the title AND exact
/// match on the selected author, both optional. Untitled articles only
/// match an empty search. Changing either filter resets to page 1; a page
/// change outside `[1, total_pages]` is silently ignored.
#[derive(Debug, Clone)]
pub struct Feed {
    articles: Vec<Article>,
    search: String,
    author: Option<Uuid>,
    page: usize,
    page_size: usize,
}

impl Feed {
    pub fn new(articles: Vec<Article>, page_size: usize) -> Self {
        Self {
            articles,
            search: String::new(),
            author: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Replace the search text and reset to the first page.
    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
        self.page = 1;
    }

    /// Select (or clear) an author filter and reset to the first page.
    pub fn select_author(&mut self, author: Option<Uuid>) {
        self.author = author;
        self.page = 1;
    }

    /// Move to `page`. Requests outside `[1, total_pages]` leave the
    /// current page unchanged.
    pub fn change_page(&mut self, page: usize) {
        if page < 1 || page > self.total_pages() {
            return;
        }
        self.page = page;
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size).max(1)
    }

    /// The articles visible on the current page.
    pub fn page_items(&self) -> Vec<&Article> {
        let filtered = self.filtered();
        let start = (self.page - 1) * self.page_size;
        filtered
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    fn filtered(&self) -> Vec<&Article> {
        let needle = self.search.to_lowercase();
        self.articles
            .iter()
            .filter(|article| {
                let match_search = needle.is_empty()
                    || article
                        .title
                        .as_deref()
                        .is_some_and(|t| t.to_lowercase().contains(&needle));
                let match_author = self.author.is_none_or(|a| article.user_id == a);
                match_search && match_author
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewArticle;
    use chrono::Utc;

    fn article(id: i64, title: Option<&str>, author: Uuid) -> Article {
        NewArticle::new(
            author,
            1,
            title.map(String::from),
            format!("content {id}"),
            format!("https://media.example/{id}.png"),
        )
        .unwrap()
        .into_article(id, Utc::now())
    }

    fn feed_of(n: i64, page_size: usize) -> Feed {
        let author = Uuid::new_v4();
        let articles = (1..=n)
            .map(|i| article(i, Some(&format!("Post Title {i}")), author))
            .collect();
        Feed::new(articles, page_size)
    }

    #[test]
    fn total_pages_is_ceiling_with_floor_of_one() {
        assert_eq!(feed_of(0, 9).total_pages(), 1);
        assert_eq!(feed_of(9, 9).total_pages(), 1);
        assert_eq!(feed_of(10, 9).total_pages(), 2);
        assert_eq!(feed_of(90, 9).total_pages(), 10);
    }

    #[test]
    fn out_of_range_page_change_is_ignored() {
        let mut feed = feed_of(20, 9); // 3 pages
        feed.change_page(2);
        assert_eq!(feed.current_page(), 2);

        feed.change_page(0);
        assert_eq!(feed.current_page(), 2);
        feed.change_page(4);
        assert_eq!(feed.current_page(), 2);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let mut feed = feed_of(20, 9);
        feed.change_page(3);
        assert_eq!(feed.page_items().len(), 2);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let author = Uuid::new_v4();
        let mut feed = Feed::new(
            vec![
                article(1, Some("Rust in Anger"), author),
                article(2, Some("gardening"), author),
                article(3, None, author),
            ],
            9,
        );
        feed.set_search("RUST");
        let ids: Vec<i64> = feed.page_items().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn untitled_articles_match_only_empty_search() {
        let author = Uuid::new_v4();
        let mut feed = Feed::new(vec![article(1, None, author)], 9);
        assert_eq!(feed.page_items().len(), 1);
        feed.set_search("anything");
        assert!(feed.page_items().is_empty());
    }

    #[test]
    fn author_filter_is_exact_and_combines_with_search() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let mut feed = Feed::new(
            vec![
                article(1, Some("Hello world"), alice),
                article(2, Some("Hello again"), bob),
                article(3, Some("Unrelated"), alice),
            ],
            9,
        );
        feed.select_author(Some(alice));
        feed.set_search("hello");
        let ids: Vec<i64> = feed.page_items().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn filter_changes_reset_to_page_one() {
        let mut feed = feed_of(30, 9);
        feed.change_page(3);
        feed.set_search("post");
        assert_eq!(feed.current_page(), 1);

        feed.change_page(2);
        feed.select_author(None);
        assert_eq!(feed.current_page(), 1);
    }
}
