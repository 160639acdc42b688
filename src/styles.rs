use crate::constants::STYLE_ELEMENT_ID;
use web_sys as web;

static CONTACT_CSS: &str = include_str!("../assets/contact.css");

/// Add the contact form stylesheet to `<head>`, once.
pub fn inject(document: &web::Document) -> anyhow::Result<()> {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let head = document
        .head()
        .ok_or_else(|| anyhow::anyhow!("document has no <head>"))?;
    let style = document
        .create_element("style")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(CONTACT_CSS));
    head.append_child(&style)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}
