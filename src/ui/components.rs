/// Reusable UI components
use patternfly_yew::prelude::*;
use yew::prelude::*;

/// One aggregate figure in the stats header.
#[derive(Properties, PartialEq)]
pub struct StatTileProps {
    pub label: AttrValue,
    pub value: String,
}

#[function_component(StatTile)]
pub fn stat_tile(props: &StatTileProps) -> Html {
    html! {
        <div class="stat-tile">
            <span class="stat-value">{&props.value}</span>
            <span class="stat-label">{&props.label}</span>
        </div>
    }
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum MessageKind {
    Success,
    Error,
}

/// Transient feedback banner shown after a consolidation action.
#[derive(Properties, PartialEq)]
pub struct MessageBannerProps {
    pub kind: MessageKind,
    pub text: String,
}

#[function_component(MessageBanner)]
pub fn message_banner(props: &MessageBannerProps) -> Html {
    let alert_type = match props.kind {
        MessageKind::Success => AlertType::Success,
        MessageKind::Error => AlertType::Danger,
    };

    html! {
        <Alert r#type={alert_type} title={props.text.clone()} inline={true}>
        </Alert>
    }
}
