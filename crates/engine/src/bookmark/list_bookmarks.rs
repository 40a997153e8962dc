use crate::{error::EngineError, shared::usecase::UseCase};
use hackwatch_domain::{Bookmark, Hackathon, ID};
use hackwatch_infra::HackwatchContext;
use tracing::warn;

/// A user's bookmarks with their events attached, newest first. Bookmarks
/// whose event has disappeared from the catalogue are dropped from the
/// listing.
#[derive(Debug)]
pub struct ListBookmarksUseCase {
    pub user_id: ID,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkedHackathon {
    pub bookmark: Bookmark,
    pub hackathon: Hackathon,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    UserNotFound(ID),
}

impl From<UseCaseErrors> for EngineError {
    fn from(e: UseCaseErrors) -> Self {
        match e {
            UseCaseErrors::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
        }
    }
}

#[async_trait::async_trait]
impl UseCase for ListBookmarksUseCase {
    type Response = Vec<BookmarkedHackathon>;
    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &HackwatchContext) -> Result<Self::Response, Self::Errors> {
        if ctx.repos.users.find(&self.user_id).await.is_none() {
            return Err(UseCaseErrors::UserNotFound(self.user_id.clone()));
        }

        let mut bookmarks = ctx.repos.bookmarks.find_by_user(&self.user_id).await;
        bookmarks.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut hydrated = Vec::with_capacity(bookmarks.len());
        for bookmark in bookmarks {
            match ctx.repos.hackathons.find(&bookmark.hackathon_id).await {
                Some(hackathon) => hydrated.push(BookmarkedHackathon {
                    bookmark,
                    hackathon,
                }),
                None => {
                    warn!(
                        "Bookmark {} points at a missing hackathon {}",
                        bookmark.id, bookmark.hackathon_id
                    );
                }
            }
        }
        Ok(hydrated)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use hackwatch_domain::User;
    use hackwatch_infra::setup_context_inmemory;

    #[tokio::test]
    async fn lists_newest_first_and_drops_orphans() {
        let ctx = setup_context_inmemory();
        let user = User::new("dev@example.com".into());
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let older = Hackathon::new("older".into(), "Older".into(), 0);
        let newer = Hackathon::new("newer".into(), "Newer".into(), 0);
        for h in [&older, &newer] {
            ctx.repos.hackathons.insert(h).await.expect("To insert");
        }

        ctx.repos
            .bookmarks
            .insert(&Bookmark::new(user.id.clone(), older.id.clone(), 1000))
            .await
            .expect("To insert bookmark");
        ctx.repos
            .bookmarks
            .insert(&Bookmark::new(user.id.clone(), newer.id.clone(), 2000))
            .await
            .expect("To insert bookmark");
        // An orphan: its event is gone from the catalogue.
        ctx.repos
            .bookmarks
            .insert(&Bookmark::new(user.id.clone(), ID::default(), 3000))
            .await
            .expect("To insert bookmark");

        let listed = execute(
            ListBookmarksUseCase {
                user_id: user.id.clone(),
            },
            &ctx,
        )
        .await
        .expect("To list bookmarks");
        let slugs = listed
            .iter()
            .map(|b| b.hackathon.slug.as_str())
            .collect::<Vec<_>>();
        assert_eq!(slugs, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn unknown_users_are_rejected() {
        let ctx = setup_context_inmemory();
        let err = execute(
            ListBookmarksUseCase {
                user_id: ID::default(),
            },
            &ctx,
        )
        .await
        .expect_err("No such user");
        assert!(matches!(err, UseCaseErrors::UserNotFound(_)));
    }
}
