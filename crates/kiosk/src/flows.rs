use formflow::{
    FlowSettings, FormState, LoginEdit, PaymentEdit, PaymentMethod, Phase, ProfileState,
    SubmissionBackend, SubmissionMachine,
};
use tracing::{info, instrument};

use crate::render::{FieldView, TextView, form_line, profile_line};

/// How a flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Completed,
    Failed,
}

impl Verdict {
    fn of<F: formflow::Form>(state: &FormState<F>) -> Self {
        match state.phase() {
            Phase::Success => Verdict::Completed,
            _ => Verdict::Failed,
        }
    }
}

#[instrument(skip(settings, password, view))]
pub async fn login(
    settings: &FlowSettings,
    email: &str,
    password: &str,
    show_password: bool,
    view: &mut TextView,
) -> Verdict {
    let screen = formflow::login_screen(settings);
    view.show(form_line(&screen.snapshot()));

    screen.on_field_changed(LoginEdit::Email(email.to_string()));
    screen.on_field_changed(LoginEdit::Password(password.to_string()));
    if show_password {
        screen.on_field_changed(LoginEdit::TogglePasswordVisibility);
    }
    submit(&screen, view).await
}

#[instrument(skip(settings, view))]
pub async fn pay(
    settings: &FlowSettings,
    amount: &str,
    method: PaymentMethod,
    view: &mut TextView,
) -> Verdict {
    let screen = formflow::payment_screen(settings);
    view.show(form_line(&screen.snapshot()));

    screen.on_field_changed(PaymentEdit::Amount(amount.to_string()));
    screen.on_field_changed(PaymentEdit::Method(method));
    submit(&screen, view).await
}

async fn submit<F, B>(screen: &SubmissionMachine<F, B>, view: &mut TextView) -> Verdict
where
    F: FieldView,
    B: SubmissionBackend<F> + 'static,
{
    view.show(form_line(&screen.snapshot()));
    screen.on_submit();
    view.show(form_line(&screen.snapshot()));

    let done = screen.settled().await;
    view.show(form_line(&done));
    let verdict = Verdict::of(&done);
    info!(form = F::NAME, ?verdict, "flow settled");
    verdict
}

/// Load the summary, retrying up to `retries` times after an error.
#[instrument(skip(settings, view))]
pub async fn profile(settings: &FlowSettings, retries: u32, view: &mut TextView) -> Verdict {
    let screen = formflow::profile_screen(settings);
    view.show(profile_line(&screen.snapshot()));

    let mut state = screen.settled().await;
    view.show(profile_line(&state));
    for attempt in 1..=retries {
        if !matches!(state, ProfileState::Error { .. }) {
            break;
        }
        info!(attempt, "retrying profile load");
        screen.retry();
        view.show(profile_line(&screen.snapshot()));
        state = screen.settled().await;
        view.show(profile_line(&state));
    }

    match state {
        ProfileState::Content(_) => Verdict::Completed,
        _ => Verdict::Failed,
    }
}

#[cfg(test)]
mod tests {
    use formflow::backend::{LOGIN_FAILED, PAYMENT_FAILED};
    use formflow::profile::PROFILE_FAILED;
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn login_prints_every_phase() {
        let mut view = TextView::default();
        let verdict = login(&FlowSettings::default(), "a@b.com", "secret", false, &mut view).await;

        assert_eq!(verdict, Verdict::Completed);
        assert_eq!(
            view.lines(),
            [
                "[login] Idle email=\"\" password=\"\" submit=off".to_string(),
                "[login] Idle email=\"a@b.com\" password=\"******\" submit=on".to_string(),
                "[login] Loading email=\"a@b.com\" password=\"******\" submit=off".to_string(),
                "[login] Success signed in as a@b.com".to_string(),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_login_fails_the_flow() {
        let mut view = TextView::default();
        let settings = FlowSettings::default();
        let verdict = login(&settings, "x@fail.com", "secret", true, &mut view).await;

        assert_eq!(verdict, Verdict::Failed);
        let last = view.lines().last().cloned().unwrap_or_default();
        assert!(last.starts_with("[login] Error"), "{last}");
        assert!(last.contains(LOGIN_FAILED));
        assert!(last.contains("password=\"secret\""));
    }

    #[tokio::test(start_paused = true)]
    async fn declined_payment_fails_the_flow() {
        let mut view = TextView::default();
        let verdict = pay(&FlowSettings::default(), "13", PaymentMethod::Upi, &mut view).await;
        assert_eq!(verdict, Verdict::Failed);
        assert!(view.lines().last().is_some_and(|l| l.contains(PAYMENT_FAILED)));
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_amount_never_reaches_loading() {
        let mut view = TextView::default();
        let verdict = pay(&FlowSettings::default(), "abc", PaymentMethod::Card, &mut view).await;
        assert_eq!(verdict, Verdict::Failed);
        assert!(!view.lines().iter().any(|l| l.contains("Loading")));
    }

    #[tokio::test(start_paused = true)]
    async fn profile_retries_until_exhausted() {
        let mut settings = FlowSettings::default();
        settings.profile.fail = true;
        let mut view = TextView::default();

        let verdict = profile(&settings, 2, &mut view).await;
        assert_eq!(verdict, Verdict::Failed);

        // TextView folds identical consecutive lines, so the sequence alternates.
        let error = format!("[profile] Error banner={PROFILE_FAILED:?}");
        assert_eq!(
            view.lines(),
            [
                "[profile] Loading".to_string(),
                error.clone(),
                "[profile] Loading".to_string(),
                error.clone(),
                "[profile] Loading".to_string(),
                error,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn profile_loads_content() {
        let mut view = TextView::default();
        let verdict = profile(&FlowSettings::default(), 3, &mut view).await;
        assert_eq!(verdict, Verdict::Completed);
        assert_eq!(view.lines().len(), 2);
    }
}
