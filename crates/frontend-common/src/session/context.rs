use crate::hooks::{use_session, UseSessionHandle};
use yew::prelude::*;

/// Session provider props
#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

/// Checks the session once for the whole tree below it
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let session = use_session();

    html! {
        <ContextProvider<UseSessionHandle> context={session}>
            {props.children.clone()}
        </ContextProvider<UseSessionHandle>>
    }
}

/// Hook to read the session provided by [`SessionProvider`]
#[hook]
pub fn use_current_session() -> UseSessionHandle {
    use_context::<UseSessionHandle>()
        .expect("Session context not found. Make sure to wrap your component with SessionProvider")
}
