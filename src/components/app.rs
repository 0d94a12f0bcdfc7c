use super::splitter::{Axis, SplitState, Splitter};
use workbench_drag::use_drag;
use yew::prelude::*;

const TREE_SPLITTER: &str = "tree-splitter";
const RUNNER_SPLITTER: &str = "runner-splitter";

// Workbench shell: file tree on the left, editor in the middle, runner output
// below it. Both splitters are tracked by one drag store.
#[function_component(App)]
pub fn app() -> Html {
    let drag = use_drag();
    let tree = use_mut_ref(|| SplitState::new(240.0, 120.0, 600.0));
    let runner = use_mut_ref(|| SplitState::new(180.0, 60.0, 480.0).inverted());

    let tree_drag = drag.get(TREE_SPLITTER);
    let runner_drag = drag.get(RUNNER_SPLITTER);
    tree.borrow_mut().apply(tree_drag, Axis::Horizontal);
    runner.borrow_mut().apply(runner_drag, Axis::Vertical);
    let tree_width = tree.borrow().size;
    let runner_height = runner.borrow().size;

    html! {
        <div id="workbench" style="display:flex; width:100vw; height:100vh; background:#0d1117; color:#c9d1d9; overflow:hidden; user-select:none;">
            <div id="tree-pane" style={format!("width:{}px; flex:none; background:#161b22; padding:8px; overflow:auto;", tree_width)}>
                <div style="font-weight:bold; margin-bottom:6px;">{"Project"}</div>
                <div>{"src/"}</div>
                <div style="padding-left:12px;">{"main.ts"}</div>
            </div>
            <Splitter node_ref={drag.node_ref(TREE_SPLITTER)} axis={Axis::Horizontal} active={tree_drag.is_dragging} />
            <div style="flex:1; display:flex; flex-direction:column; min-width:0;">
                <div id="editor" style="flex:1; padding:8px; font-family:monospace;">
                    {"// editor"}
                </div>
                <Splitter node_ref={drag.node_ref(RUNNER_SPLITTER)} axis={Axis::Vertical} active={runner_drag.is_dragging} />
                <div id="runner" style={format!("height:{}px; flex:none; background:#161b22; padding:8px;", runner_height)}>
                    {"Runner"}
                </div>
            </div>
        </div>
    }
}
