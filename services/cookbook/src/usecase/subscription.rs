use crate::domain::repository::{RecipeRepository, SubscriptionRepository, UserRepository};
use crate::domain::types::{SubscriptionEntry, User};
use crate::error::CookbookServiceError;

async fn subscription_entry<R: RecipeRepository>(
    recipes: &R,
    user: User,
    recipes_limit: Option<u64>,
) -> Result<SubscriptionEntry, CookbookServiceError> {
    let previews = recipes.summaries_by_author(user.id, recipes_limit).await?;
    let recipes_count = recipes.count_by_author(user.id).await?;
    Ok(SubscriptionEntry {
        user,
        recipes: previews,
        recipes_count,
    })
}

// ── Subscribe ────────────────────────────────────────────────────────────────

pub struct SubscribeUseCase<S: SubscriptionRepository, U: UserRepository, R: RecipeRepository> {
    pub subs: S,
    pub users: U,
    pub recipes: R,
}

impl<S: SubscriptionRepository, U: UserRepository, R: RecipeRepository>
    SubscribeUseCase<S, U, R>
{
    pub async fn execute(
        &self,
        follower_id: i32,
        followee_id: i32,
        recipes_limit: Option<u64>,
    ) -> Result<SubscriptionEntry, CookbookServiceError> {
        if follower_id == followee_id {
            return Err(CookbookServiceError::SelfSubscription);
        }
        let user = self
            .users
            .find_by_id(followee_id)
            .await?
            .ok_or(CookbookServiceError::UserNotFound)?;
        let created = self.subs.create(follower_id, followee_id).await?;
        if !created {
            return Err(CookbookServiceError::AlreadySubscribed);
        }
        subscription_entry(&self.recipes, user, recipes_limit).await
    }
}

// ── Unsubscribe ──────────────────────────────────────────────────────────────

pub struct UnsubscribeUseCase<S: SubscriptionRepository, U: UserRepository> {
    pub subs: S,
    pub users: U,
}

impl<S: SubscriptionRepository, U: UserRepository> UnsubscribeUseCase<S, U> {
    pub async fn execute(
        &self,
        follower_id: i32,
        followee_id: i32,
    ) -> Result<(), CookbookServiceError> {
        self.users
            .find_by_id(followee_id)
            .await?
            .ok_or(CookbookServiceError::UserNotFound)?;
        let deleted = self.subs.delete(follower_id, followee_id).await?;
        if !deleted {
            return Err(CookbookServiceError::NotSubscribed);
        }
        Ok(())
    }
}

// ── ListSubscriptions ────────────────────────────────────────────────────────

pub struct ListSubscriptionsUseCase<S: SubscriptionRepository, R: RecipeRepository> {
    pub subs: S,
    pub recipes: R,
}

impl<S: SubscriptionRepository, R: RecipeRepository> ListSubscriptionsUseCase<S, R> {
    /// Followees with a capped recipe preview and the uncapped total count.
    pub async fn execute(
        &self,
        follower_id: i32,
        recipes_limit: Option<u64>,
    ) -> Result<Vec<SubscriptionEntry>, CookbookServiceError> {
        let followees = self.subs.followees(follower_id).await?;
        let mut entries = Vec::with_capacity(followees.len());
        for user in followees {
            entries.push(subscription_entry(&self.recipes, user, recipes_limit).await?);
        }
        Ok(entries)
    }
}
