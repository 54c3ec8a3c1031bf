//! Built-in destination catalog.

use super::types::{Category, DestinationKind};

use Category::*;
use DestinationKind::*;

/// (name, base URL, category, kind), in publish order.
pub(super) const BUILTIN_DESTINATIONS: &[(&str, &str, Category, DestinationKind)] = &[
    ("Facebook", "https://www.facebook.com", Social, Site),
    ("Twitter", "https://twitter.com", Social, Site),
    ("LinkedIn", "https://www.linkedin.com", Social, Site),
    ("Reddit", "https://www.reddit.com", Social, Site),
    ("Pinterest", "https://www.pinterest.com", Social, Site),
    ("Tumblr", "https://www.tumblr.com", Social, Site),
    ("VK", "https://vk.com", Social, Site),
    ("Mix", "https://mix.com", Social, Site),
    ("YouTube", "https://www.youtube.com", Video, Site),
    ("Vimeo", "https://vimeo.com", Video, Site),
    ("Dailymotion", "https://www.dailymotion.com", Video, Site),
    ("Rumble", "https://rumble.com", Video, Site),
    ("Odysee", "https://odysee.com", Video, Site),
    ("Medium", "https://medium.com", Blog, Site),
    ("Blogger", "https://www.blogger.com", Blog, Site),
    ("WordPress", "https://wordpress.com", Blog, Site),
    ("Substack", "https://substack.com", Blog, Site),
    ("Hashnode", "https://hashnode.com", Blog, Site),
    ("Dev.to", "https://dev.to", Blog, Site),
    ("Hacker News", "https://news.ycombinator.com", News, Site),
    ("Slashdot", "https://slashdot.org", News, Site),
    ("Digg", "https://digg.com", News, Site),
    ("Flipboard", "https://flipboard.com", News, Site),
    ("Quora", "https://www.quora.com", Unknown, Site),
    ("Product Hunt", "https://www.producthunt.com", Unknown, Site),
    ("Arab Forums", "https://www.arabforums.net", ArabicForum, Forum),
    ("Montada", "https://www.montada.com", ArabicForum, Forum),
    ("Arabia Weather Forum", "https://forum.arabiaweather.com", ArabicForum, Forum),
    ("Hsoub I/O", "https://io.hsoub.com", ArabicForum, Forum),
    ("Stack Exchange Meta", "https://meta.stackexchange.com", Unknown, Forum),
    ("XDA Forums", "https://xdaforums.com", Unknown, Forum),
    ("Warrior Forum", "https://www.warriorforum.com", Unknown, Forum),
];
