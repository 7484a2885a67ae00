use super::*;

const BLOG: &str = "https://dilutedstories.com/blog.html";

#[traced_test]
#[tokio::test]
async fn test_deep_link_opens_article_on_load() {
  let mut nav = navigator_at(&format!("{BLOG}#quiet-rooms"));

  assert_eq!(nav.handle(NavEvent::PageLoad).await, Transition::Opened("quiet-rooms".into()));

  let surface = nav.modal().surface();
  assert!(surface.is_visible(Region::Modal));
  assert!(surface.scroll_locked());
  assert_eq!(surface.text(Region::Title), Some("Quiet Rooms"));
  assert_eq!(surface.text(Region::Meta), Some("By Ana · 6 min read"));
  assert_eq!(
    surface.markup(Region::Body),
    Some("<p>The lamps stay on.</p><p>Nobody &amp; nothing moves.</p>")
  );
  let hero = surface.region(Region::HeroImage).unwrap();
  assert_eq!(hero.src.as_deref(), Some("https://source.unsplash.com/Ab3dE5gH7jK/1600x900"));
  assert_eq!(hero.alt.as_deref(), Some("An empty reading room"));
  assert_eq!(surface.active_element(), Some(ElementId::region(Region::Panel)));

  // Loading the deep link does not add history.
  assert_eq!(nav.history().len(), 1);
}

#[traced_test]
#[tokio::test]
async fn test_unknown_deep_link_is_ignored() {
  let mut nav = navigator_at(&format!("{BLOG}#no-such-story"));

  assert_eq!(nav.handle(NavEvent::PageLoad).await, Transition::Ignored);
  assert!(!nav.modal().is_open());
  assert!(!nav.modal().surface().is_visible(Region::Modal));
  assert_eq!(nav.history().fragment().as_deref(), Some("no-such-story"));
  assert!(logs_contain("No article with id no-such-story"));
}

#[traced_test]
#[tokio::test]
async fn test_page_load_without_fragment_does_nothing() {
  let mut nav = navigator_at(BLOG);
  assert_eq!(nav.handle(NavEvent::PageLoad).await, Transition::Ignored);
  // The collection is still only loaded on demand.
  assert!(nav.store().last_outcome().is_none());
}

#[traced_test]
#[tokio::test]
async fn test_activation_pushes_history() {
  let mut nav = navigator_at(BLOG);

  let opened = nav.handle(NavEvent::Activate("#quiet-rooms".into())).await;
  assert_eq!(opened, Transition::Opened("quiet-rooms".into()));
  assert_eq!(nav.history().len(), 2);
  assert_eq!(nav.history().location().as_str(), format!("{BLOG}#quiet-rooms"));

  // Activating the article already on display adds no entry.
  nav.handle(NavEvent::Activate("blog.html#quiet-rooms".into())).await;
  assert_eq!(nav.history().len(), 2);

  // Unknown and fragment-less links change nothing.
  assert_eq!(nav.handle(NavEvent::Activate("#missing".into())).await, Transition::Ignored);
  assert_eq!(nav.handle(NavEvent::Activate("about.html".into())).await, Transition::Ignored);
  assert_eq!(nav.history().len(), 2);
  assert_eq!(nav.modal().open_article(), Some("quiet-rooms"));
}

#[traced_test]
#[tokio::test]
async fn test_close_restores_focus_and_drops_fragment() {
  let mut nav = navigator_at(BLOG);
  nav.handle(NavEvent::Activate("#quiet-rooms".into())).await;
  assert_ne!(nav.modal().surface().active_element(), Some(card_focus()));

  assert_eq!(nav.handle(NavEvent::Close).await, Transition::Closed);

  let surface = nav.modal().surface();
  assert!(!surface.is_visible(Region::Modal));
  assert!(!surface.scroll_locked());
  assert_eq!(surface.active_element(), Some(card_focus()));
  assert_eq!(nav.history().fragment(), None);
  assert_eq!(nav.history().len(), 2);

  // Neither back nor forward brings the closed article back.
  assert!(nav.history_mut().back());
  assert_eq!(nav.handle(NavEvent::FragmentChanged).await, Transition::Ignored);
  assert!(nav.history_mut().forward());
  assert_eq!(nav.handle(NavEvent::FragmentChanged).await, Transition::Ignored);
  assert!(!nav.modal().is_open());
}

#[traced_test]
#[tokio::test]
async fn test_close_when_focus_target_is_gone() {
  let mut nav = navigator_at(BLOG);
  nav.handle(NavEvent::Activate("#quiet-rooms".into())).await;
  nav.modal_mut().surface_mut().remove_focusable(&card_focus());

  assert_eq!(nav.handle(NavEvent::Backdrop).await, Transition::Closed);
  assert_ne!(nav.modal().surface().active_element(), Some(card_focus()));
}

#[traced_test]
#[tokio::test]
async fn test_escape_closes_only_an_open_modal() {
  let mut nav = navigator_at(BLOG);
  assert_eq!(nav.handle(NavEvent::Key(Key::Escape)).await, Transition::Ignored);

  nav.handle(NavEvent::Activate("#salt-roads".into())).await;
  assert_eq!(nav.handle(NavEvent::Key(Key::Other)).await, Transition::Ignored);
  assert!(nav.modal().is_open());

  assert_eq!(nav.handle(NavEvent::Key(Key::Escape)).await, Transition::Closed);
  assert_eq!(nav.history().fragment(), None);
  assert_eq!(nav.handle(NavEvent::Close).await, Transition::Ignored);
}

#[traced_test]
#[tokio::test]
async fn test_back_and_forward_follow_the_fragment() {
  let mut nav = navigator_at(BLOG);
  nav.handle(NavEvent::Activate("#quiet-rooms".into())).await;
  nav.handle(NavEvent::Activate("#salt-roads".into())).await;
  assert_eq!(nav.history().len(), 3);

  nav.history_mut().back();
  assert_eq!(nav.handle(NavEvent::FragmentChanged).await, Transition::Opened("quiet-rooms".into()));
  assert_eq!(nav.modal().surface().text(Region::Title), Some("Quiet Rooms"));

  // Focus goes back to where it was before the first open, across content swaps.
  nav.history_mut().back();
  assert_eq!(nav.handle(NavEvent::FragmentChanged).await, Transition::Closed);
  assert_eq!(nav.modal().surface().active_element(), Some(card_focus()));

  nav.history_mut().forward();
  nav.history_mut().forward();
  assert_eq!(nav.handle(NavEvent::FragmentChanged).await, Transition::Opened("salt-roads".into()));
}

#[traced_test]
#[tokio::test]
async fn test_address_edit_opens_article() {
  let mut nav = navigator_at(BLOG);
  nav.history_mut().navigate("#salt-roads").unwrap();
  assert_eq!(nav.handle(NavEvent::FragmentChanged).await, Transition::Opened("salt-roads".into()));
}

#[traced_test]
#[tokio::test]
async fn test_reading_controls_inside_modal() {
  let mut nav = navigator_at(&format!("{BLOG}#quiet-rooms"));
  nav.handle(NavEvent::PageLoad).await;

  assert_eq!(nav.modal_mut().bigger_text().value(), 1.05);
  assert_eq!(nav.modal().surface().region(Region::Body).unwrap().text_scale, 1.05);

  nav.modal_mut().speak().unwrap();
  let spoken = nav.modal().speech().current().unwrap();
  assert!(spoken.text.starts_with("Quiet Rooms\n\n"));
  assert!(spoken.text.contains("Nobody & nothing moves."));

  nav.handle(NavEvent::Close).await;
  assert!(nav.modal().speech().current().is_none());
  assert_eq!(nav.modal().speech().cancels(), 1);

  // Reopening starts from the default scale again.
  nav.handle(NavEvent::Activate("#quiet-rooms".into())).await;
  assert_eq!(nav.modal().text_scale().value(), 1.0);
}

#[traced_test]
#[tokio::test]
async fn test_page_without_modal_region() {
  let store =
    Arc::new(ArticleStore::new(InlineSource::from_json(DATASET).unwrap(), MemorySnapshot::new()));
  let modal = PreviewModal::new(MemorySurface::new(), SpeechQueue::default());
  let mut nav = Navigator::new(store, modal, MemoryHistory::new(BLOG).unwrap());

  assert_eq!(nav.handle(NavEvent::Activate("#quiet-rooms".into())).await, Transition::Ignored);
  assert_eq!(nav.history().len(), 1);
}
