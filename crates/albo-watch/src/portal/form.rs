//! Fixed form fields the Drupal views endpoint expects.
//!
//! These mirror what the albo page sends from a browser. The endpoint rejects
//! or ignores requests without the page state, so the values are kept verbatim.

/// Build the full form body for one listing page.
pub fn fields(dom_id: &str, page: u32) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("view_name", "albo_online".to_string()),
        ("view_display_id", "block".to_string()),
        ("view_args", String::new()),
        ("view_path", "node/3721".to_string()),
        ("view_base_path", String::new()),
        ("view_dom_id", dom_id.to_string()),
        ("pager_element", "0".to_string()),
        ("page", page.to_string()),
    ];

    fields.extend(AJAX_HTML_IDS.iter().map(|id| ("ajax_html_ids[]", (*id).to_string())));
    fields.extend(AJAX_PAGE_STATE.iter().map(|(k, v)| (*k, (*v).to_string())));

    fields
}

/// Element ids present on the albo page when the pager is clicked.
pub const AJAX_HTML_IDS: &[&str] = &[
    "skip-link",
    "header-fullwidth",
    "top",
    "block-block-36",
    "search-block-form",
    "edit-search-block-form--2",
    "edit-actions",
    "edit-submit",
    "tb-megamenu-column-1",
    "tb-megamenu-column-2",
    "tb-megamenu-column-3",
    "tb-megamenu-column-4",
    "tb-megamenu-column-5",
    "tb-megamenu-column-6",
    "tb-megamenu-column-7",
    "tb-megamenu-column-8",
    "tb-megamenu-column-9",
    "tb-megamenu-column-10",
    "tb-megamenu-column-11",
    "tb-megamenu-column-12",
    "tb-megamenu-column-13",
    "tb-megamenu-column-14",
    "tb-megamenu-column-15",
    "tb-megamenu-column-16",
    "tb-megamenu-column-17",
    "tb-megamenu-column-18",
    "tb-megamenu-column-19",
    "tb-megamenu-column-20",
    "tb-megamenu-column-21",
    "tb-megamenu-column-22",
    "Main-Content",
    "content_top",
    "block-block-44",
    "content",
    "block-system-main",
    "node-3721",
    "block-views-albo-online-block",
    "views-exposed-form-albo-online-block",
    "edit-field-tipologia-atto-value-wrapper",
    "edit-field-tipologia-atto-value",
    "edit-field-dipartimento-struttura-value-wrapper",
    "edit-field-dipartimento-struttura-value",
    "edit-submit-albo-online",
    "sidebar",
    "block-block-57",
    "menuJ",
    "sidebar-menu-1",
    "Content-FullWidth",
    "Footer-FullWidth",
    "footer",
    "block-block-37",
    "footermenup",
    "footermenup",
    "footermenup",
    "copyright",
    "block-block-80",
];

/// Theme, stylesheet and script state of the albo page.
pub const AJAX_PAGE_STATE: &[(&str, &str)] = &[
    ("ajax_page_state[theme]", "jango_sub"),
    ("ajax_page_state[theme_token]", "xl2yCVw4NM0p5QtGmrXqImVXqFdfiNIcWP-XKlMDgnI"),
    ("ajax_page_state[css][0]", "1"),
    ("ajax_page_state[css][modules/system/system.base.css]", "1"),
    ("ajax_page_state[css][modules/aggregator/aggregator.css]", "1"),
    ("ajax_page_state[css][modules/book/book.css]", "1"),
    ("ajax_page_state[css][modules/comment/comment.css]", "1"),
    ("ajax_page_state[css][sites/all/modules/date/date_api/date.css]", "1"),
    ("ajax_page_state[css][sites/all/modules/date/date_popup/themes/datepicker.1.7.css]", "1"),
    ("ajax_page_state[css][sites/all/modules/date/date_repeat_field/date_repeat_field.css]", "1"),
    ("ajax_page_state[css][modules/field/theme/field.css]", "1"),
    ("ajax_page_state[css][modules/node/node.css]", "1"),
    ("ajax_page_state[css][modules/poll/poll.css]", "1"),
    ("ajax_page_state[css][modules/forum/forum.css]", "1"),
    ("ajax_page_state[css][sites/all/modules/views/css/views.css]", "1"),
    ("ajax_page_state[css][sites/all/modules/ckeditor/css/ckeditor.css]", "1"),
    ("ajax_page_state[css][sites/all/modules/media/modules/media_wysiwyg/css/media_wysiwyg.base.css]", "1"),
    ("ajax_page_state[css][sites/all/modules/ctools/css/ctools.css]", "1"),
    ("ajax_page_state[css][sites/all/modules/eu_cookie_compliance/css/eu_cookie_compliance.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/plugins/socicon/socicon.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/plugins/bootstrap-social/bootstrap-social.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/plugins/font-awesome/css/font-awesome.min.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/plugins/simple-line-icons/simple-line-icons.min.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/plugins/animate/animate.min.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/plugins/cubeportfolio/css/cubeportfolio.min.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/plugins/owl-carousel/assets/owl.carousel.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/plugins/fancybox/jquery.fancybox.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/plugins/slider-for-bootstrap/css/slider.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/plugins/ilightbox/css/ilightbox.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/css/YTPlayer.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/css/fonts.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/plugins/bootstrap/css/bootstrap.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/base/css/plugins.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/base/css/components.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/base/css/custom.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/css/drupal.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/assets/base/css/themes/default.css]", "1"),
    ("ajax_page_state[css][sites/all/themes/jango/jango_sub/css/custom.css]", "1"),
    ("ajax_page_state[js][0]", "1"),
    ("ajax_page_state[js][1]", "1"),
    ("ajax_page_state[js][sites/all/modules/eu_cookie_compliance/js/eu_cookie_compliance.js]", "1"),
    ("ajax_page_state[js][sites/all/modules/jquery_update/replace/jquery/1.10/jquery.min.js]", "1"),
    ("ajax_page_state[js][misc/jquery.once.js]", "1"),
    ("ajax_page_state[js][misc/drupal.js]", "1"),
    ("ajax_page_state[js][sites/all/modules/jquery_update/replace/ui/external/jquery.cookie.js]", "1"),
    ("ajax_page_state[js][sites/all/modules/jquery_update/replace/jquery.form/4/jquery.form.min.js]", "1"),
    ("ajax_page_state[js][misc/ajax.js]", "1"),
    ("ajax_page_state[js][sites/all/modules/jquery_update/js/jquery_update.js]", "1"),
    ("ajax_page_state[js][sites/all/modules/admin_menu/admin_devel/admin_devel.js]", "1"),
    ("ajax_page_state[js][public://languages/it_Y-dxfs1QQ3P6fOXNBZai201929U2R6WLuVA3N2bGU7I.js]", "1"),
    ("ajax_page_state[js][misc/tableheader.js]", "1"),
    ("ajax_page_state[js][sites/all/modules/views/js/base.js]", "1"),
    ("ajax_page_state[js][misc/progress.js]", "1"),
    ("ajax_page_state[js][sites/all/modules/views/js/ajax_view.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/jquery-migrate.min.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/bootstrap/js/bootstrap.min.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/jquery.easing.min.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/reveal-animate/wow.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/cubeportfolio/js/jquery.cubeportfolio.min.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/owl-carousel/owl.carousel.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/counterup/jquery.waypoints.min.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/counterup/jquery.counterup.min.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/fancybox/jquery.fancybox.pack.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/slider-for-bootstrap/js/bootstrap-slider.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/zoom-master/jquery.zoom.min.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/isotope/isotope.pkgd.min.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/isotope/imagesloaded.pkgd.min.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/isotope/packery-mode.pkgd.min.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/ilightbox/js/jquery.requestAnimationFrame.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/ilightbox/js/jquery.mousewheel.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/ilightbox/js/ilightbox.packed.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/progress-bar/progressbar.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/base/js/scripts/reveal-animate/reveal-animate.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/base/js/app.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/base/js/components.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/base/js/components-shop.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/gmaps/gmaps.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/assets/plugins/gmaps/api.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/js/jquery.mb.YTPlayer.js]", "1"),
    ("ajax_page_state[js][sites/all/themes/jango/js/drupal.js]", "1"),
    ("ajax_page_state[jquery_version]", "1.10"),
];
