//! Demo: two modules, one widget, a short editing session.

use course_module::clients::WidgetClient;
use course_module::collaborators::{DirectoryDownloader, FileHandle, NodePath};
use course_module::lifecycle::{setup_tracing, CourseSystem, WidgetConfig};
use course_module::model::Module;
use course_module::widget::{root_node_id, DragLocation, MenuButton};
use std::sync::Arc;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = match std::env::var("COURSE_MODULE_CONFIG") {
        Ok(path) => WidgetConfig::load(path).map_err(|e| e.to_string())?,
        Err(_) => WidgetConfig::default(),
    };
    let delays = config.feedback;

    let download_dir = std::env::temp_dir().join("course-module-downloads");
    std::fs::create_dir_all(&download_dir).map_err(|e| e.to_string())?;
    info!(dir = %download_dir.display(), "Starting course module demo");

    let mut system = CourseSystem::new(config, Arc::new(DirectoryDownloader::new(&download_dir)));
    system
        .seed(vec![Module::new("m1", "Week 1"), Module::new("m2", "Week 2")])
        .await
        .map_err(|e| e.to_string())?;

    let widget = system
        .mount(&"m1".into())
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("editing", module_id = "m1");
    session(&system, &widget)
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;

    // let the last message clear
    tokio::time::sleep(delays.long()).await;
    let snapshot = widget.snapshot().await.map_err(|e| e.to_string())?;
    info!(
        title = %snapshot.title,
        resources = ?snapshot.resource_titles(),
        mode = %snapshot.mode,
        feedback = %snapshot.feedback,
        "Final state"
    );

    let modules = system.modules.list_modules().await.map_err(|e| e.to_string())?;
    for module in &modules {
        info!(
            id = %module.id,
            title = %module.title,
            resources = module.resources.len(),
            "Stored module"
        );
    }

    drop(widget);
    system.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}

async fn session(
    system: &CourseSystem,
    widget: &WidgetClient,
) -> Result<(), Box<dyn std::error::Error>> {
    widget.toggle_options(MenuButton::ellipsis()).await?;
    widget.request_upload().await?;
    widget
        .select_file(Some(FileHandle::in_memory(
            "notes.pdf",
            b"%PDF-1.7 lecture notes".to_vec(),
        )))
        .await?;
    info!(feedback = %system.feedback.current(), "After upload");

    widget.toggle_options(MenuButton::ellipsis()).await?;
    widget.request_add_link().await?;
    widget.submit_link("https://doc.rust-lang.org/book/", "").await?;
    widget.cancel_link().await?;

    // a click elsewhere on the page closes menus but not the title editor
    widget.start_title_edit().await?;
    widget.edit_title("Week 1: Ownership").await?;
    system.document.pointer_down(NodePath::new(["editor", "sidebar"]));
    widget.commit_title_edit().await?;

    let snapshot = widget.snapshot().await?;
    let ids = snapshot.resource_ids();
    if let Some(link) = ids.last() {
        let droppable = snapshot.module_id.to_string();
        widget.drag_begin(link.clone(), ids.len() - 1).await?;
        widget.drag_over(Some(0)).await?;
        widget
            .drag_commit(
                link.clone(),
                DragLocation::new(droppable.clone(), ids.len() - 1),
                Some(DragLocation::new(droppable, 0)),
            )
            .await?;
    }

    if let Some(file) = ids.first() {
        widget.download(file.clone()).await?;
        widget.rename_resource(file.clone(), "Lecture notes").await?;
    }

    let inside = NodePath::new(["editor".to_string(), root_node_id(&snapshot.module_id)]);
    widget.toggle_options(MenuButton::ellipsis()).await?;
    system.document.pointer_down(inside);
    let outcome = widget.toggle_options(MenuButton::ellipsis()).await?;
    info!(applied = outcome.is_applied(), "Menu closed by its own toggle");
    Ok(())
}
