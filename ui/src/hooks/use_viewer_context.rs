use payloads::{PostId, UserId, responses::ViewerContext};
use std::rc::Rc;
use yew::prelude::*;

use super::{FetchState, use_fetch};
use crate::get_api_client;

/// The session user's likes and follows, fetched per page and passed down
/// to the buttons that need it.
#[derive(Clone, PartialEq)]
pub struct ViewerContextHandle {
    pub context: ViewerContext,
    /// False until the first fetch has arrived. Like buttons read their
    /// initial state from the context, so feeds wait for it.
    pub is_loaded: bool,
    /// Re-fetch from the server, e.g. after following someone.
    pub refresh: Callback<()>,
    /// Record a like the server already confirmed, without a round trip.
    pub set_liked: Callback<(PostId, bool)>,
}

impl ViewerContextHandle {
    pub fn has_liked(&self, post_id: &PostId) -> bool {
        self.context.has_liked(post_id)
    }

    pub fn is_following(&self, user_id: &UserId) -> bool {
        self.context.is_following(user_id)
    }

    pub fn is_own(&self, user_id: &UserId) -> bool {
        self.context.is_own(user_id)
    }
}

#[derive(Default, PartialEq)]
struct LocalContext(Option<ViewerContext>);

enum ContextAction {
    Replace(ViewerContext),
    SetLiked(PostId, bool),
}

impl Reducible for LocalContext {
    type Action = ContextAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let context = match action {
            ContextAction::Replace(context) => context,
            ContextAction::SetLiked(post_id, liked) => {
                let mut context = self.0.clone().unwrap_or_default();
                context.set_liked(post_id, liked);
                context
            }
        };
        Rc::new(Self(Some(context)))
    }
}

#[hook]
pub fn use_viewer_context() -> ViewerContextHandle {
    let fetched = use_fetch((), || async {
        get_api_client()
            .viewer_context()
            .await
            .map_err(|e| e.to_string())
    });
    let local = use_reducer_eq(LocalContext::default);

    // A fresh fetch replaces any local edits.
    {
        let local = local.clone();
        use_effect_with(fetched.data.clone(), move |data| {
            if let FetchState::Fetched(context) = data {
                local.dispatch(ContextAction::Replace(context.clone()));
            }
        });
    }

    let set_liked = {
        let local = local.clone();
        Callback::from(move |(post_id, liked): (PostId, bool)| {
            local.dispatch(ContextAction::SetLiked(post_id, liked));
        })
    };

    ViewerContextHandle {
        context: local.0.clone().unwrap_or_default(),
        is_loaded: local.0.is_some(),
        refresh: fetched.refetch,
        set_liked,
    }
}
